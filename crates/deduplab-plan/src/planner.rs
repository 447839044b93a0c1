use std::path::Path;

use chrono::Utc;
use deduplab_store::DuplicateGroup;

use crate::row::PlanRow;
use crate::unique::ensure_unique;

pub const QUARANTINE_DIR: &str = ".deduplab_duplicates";

fn iso_now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Builds PlanRows for all duplicate groups. Per group: sort paths
/// lexicographically, keep the smallest (the keeper), and plan a quarantine
/// move for every other member. Rollback keys are monotonic across the
/// entire plan. Deterministic given an unchanged Store and filesystem.
pub fn build_plan(groups: &[DuplicateGroup]) -> Vec<PlanRow> {
    build_plan_at(groups, &iso_now())
}

/// Same as `build_plan` but with an injected timestamp, so scenario tests
/// can assert on exact output without depending on wall-clock time.
pub fn build_plan_at(groups: &[DuplicateGroup], ts: &str) -> Vec<PlanRow> {
    let mut rows = Vec::new();
    let mut rollback_ordinal = 0u32;

    for group in groups {
        let mut paths = group.paths.clone();
        paths.sort();
        let Some((_keeper, sources)) = paths.split_first() else {
            continue;
        };

        for src in sources {
            let src_path = Path::new(src);
            let dup_dir = src_path
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(QUARANTINE_DIR);
            let candidate = dup_dir.join(src_path.file_name().unwrap_or_default());
            let dst = ensure_unique(&candidate);

            rows.push(PlanRow::planned_move(
                src.clone(),
                dst.to_string_lossy().into_owned(),
                &group.sha256,
                group.context_tag.as_str(),
                rollback_ordinal,
                ts,
            ));
            rollback_ordinal += 1;
        }
    }

    rows
}
