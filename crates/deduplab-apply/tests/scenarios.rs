use std::fs;

use deduplab_apply::{apply_plan, rollback_from_checkpoint, verify_checkpoint};
use deduplab_classify::ContextTag;
use deduplab_plan::{build_plan_at, PlanRow};
use deduplab_store::{DuplicateGroup, Store};
use tempfile::tempdir;

fn group(sha: &str, ctx: ContextTag, paths: &[&str]) -> DuplicateGroup {
    DuplicateGroup {
        sha256: sha.to_string(),
        context_tag: ctx,
        paths: paths.iter().map(|s| s.to_string()).collect(),
    }
}

/// Scenario A: two byte-identical files in the same context collapse into
/// one duplicate group and produce a single planned move.
#[test]
fn scenario_identical_files_same_context() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, b"same bytes").unwrap();
    fs::write(&b, b"same bytes").unwrap();

    let groups = vec![group(
        "hash1",
        ContextTag::Unarchived,
        &[a.to_str().unwrap(), b.to_str().unwrap()],
    )];
    let rows = build_plan_at(&groups, "2026-01-01T00:00:00Z");
    assert_eq!(rows.len(), 1);

    let checkpoint_path = dir.path().join("checkpoint.json");
    let checkpoint = apply_plan(&rows, &checkpoint_path, false).unwrap();
    assert_eq!(checkpoint.statistics.succeeded, 1);
}

/// Scenario B: identical bytes split across an archived and an unarchived
/// path form two separate duplicate groups, each planned independently.
#[test]
fn scenario_identical_bytes_across_archived_and_unarchived() {
    let dir = tempdir().unwrap();
    for name in ["archived_1", "archived_2", "unarchived_1", "unarchived_2"] {
        fs::write(dir.path().join(format!("{name}.txt")), b"payload").unwrap();
    }

    let groups = vec![
        group(
            "hashX",
            ContextTag::Archived,
            &["root/archived_1.txt", "root/archived_2.txt"],
        ),
        group(
            "hashX",
            ContextTag::Unarchived,
            &["root/unarchived_1.txt", "root/unarchived_2.txt"],
        ),
    ];
    let rows = build_plan_at(&groups, "2026-01-01T00:00:00Z");

    assert_eq!(rows.len(), 2);
    assert!(rows[0].content_id.ends_with(":ctx:archived"));
    assert!(rows[1].content_id.ends_with(":ctx:unarchived"));
}

/// Scenario C: the quarantine destination is already occupied — the planner
/// must produce a collision-free destination via `ensure_unique`.
#[test]
fn scenario_destination_collision_at_apply_time() {
    let dir = tempdir().unwrap();
    let quarantine = dir.path().join(".deduplab_duplicates");
    fs::create_dir_all(&quarantine).unwrap();
    fs::write(quarantine.join("zzz_dup.txt"), b"already here").unwrap();
    fs::write(dir.path().join("aaa_keeper.txt"), b"to move").unwrap();
    fs::write(dir.path().join("zzz_dup.txt"), b"to move").unwrap();

    // Lexicographic ordering keeps "aaa_keeper.txt" and plans "zzz_dup.txt"
    // for quarantine, whose natural destination is already occupied.
    let groups = vec![group(
        "hashY",
        ContextTag::Unarchived,
        &[
            dir.path().join("aaa_keeper.txt").to_str().unwrap(),
            dir.path().join("zzz_dup.txt").to_str().unwrap(),
        ],
    )];
    let rows = build_plan_at(&groups, "2026-01-01T00:00:00Z");

    assert_eq!(rows.len(), 1);
    assert_ne!(rows[0].dst_path, quarantine.join("zzz_dup.txt").to_string_lossy());
    assert!(rows[0].dst_path.contains("zzz_dup (1).txt"));

    let checkpoint_path = dir.path().join("checkpoint.json");
    let checkpoint = apply_plan(&rows, &checkpoint_path, false).unwrap();
    assert_eq!(checkpoint.statistics.succeeded, 1);
}

/// A plan row whose source vanished mid-run is skipped, not treated as an
/// apply failure. Distinct from Scenario D (mid-apply interrupt) below.
#[test]
fn vanished_source_is_skipped_not_errored() {
    let dir = tempdir().unwrap();
    let row = PlanRow::planned_move(
        dir.path().join("gone.txt").to_string_lossy().into_owned(),
        dir.path().join(".deduplab_duplicates/gone.txt").to_string_lossy().into_owned(),
        "hashZ",
        "unarchived",
        0,
        "2026-01-01T00:00:00Z",
    );

    let checkpoint_path = dir.path().join("checkpoint.json");
    let checkpoint = apply_plan(&[row], &checkpoint_path, false).unwrap();

    assert_eq!(checkpoint.statistics.skipped, 1);
    assert_eq!(checkpoint.statistics.succeeded, 0);
    assert_eq!(checkpoint.statistics.errors, 0);
}

fn plan_row_for(src: &std::path::Path, ordinal: u32) -> PlanRow {
    let dst = src.parent().unwrap().join(".deduplab_duplicates").join(src.file_name().unwrap());
    PlanRow::planned_move(
        src.to_string_lossy().into_owned(),
        dst.to_string_lossy().into_owned(),
        "hashD",
        "unarchived",
        ordinal,
        "2026-01-01T00:00:00Z",
    )
}

/// Scenario D: five planned moves, process killed after three succeed. The
/// checkpoint eager-flush contract means the on-disk manifest after exactly
/// three successes already contains three move entries — the same content a
/// kill between rows 3 and 4 would have left behind. Re-running the full
/// plan then skips those three (sources now absent) and moves the remaining
/// two. Rollback of the three-entry checkpoint restores exactly three.
#[test]
fn scenario_mid_apply_interrupt() {
    let dir = tempdir().unwrap();
    let mut srcs = Vec::new();
    for i in 0..5 {
        let src = dir.path().join(format!("f{i}.txt"));
        fs::write(&src, format!("content {i}")).unwrap();
        srcs.push(src);
    }

    // The batch as it would exist at the instant of a kill: only the first
    // three rows were handed to the applier before the process died.
    let first_three: Vec<PlanRow> = srcs[..3]
        .iter()
        .enumerate()
        .map(|(i, s)| plan_row_for(s, i as u32))
        .collect();

    let checkpoint_path = dir.path().join("checkpoint.json");
    let checkpoint = apply_plan(&first_three, &checkpoint_path, false).unwrap();

    assert_eq!(checkpoint.statistics.succeeded, 3);
    assert_eq!(checkpoint.moves.len(), 3);
    let on_disk = deduplab_apply::Checkpoint::read(&checkpoint_path).unwrap();
    assert_eq!(on_disk.moves.len(), 3);

    // Re-running apply against the full five-row plan: the first three are
    // now skipped (already moved, source absent), the remaining two succeed.
    let full_plan: Vec<PlanRow> =
        srcs.iter().enumerate().map(|(i, s)| plan_row_for(s, i as u32)).collect();
    let resume_checkpoint_path = dir.path().join("checkpoint_resume.json");
    let resumed = apply_plan(&full_plan, &resume_checkpoint_path, false).unwrap();

    assert_eq!(resumed.statistics.skipped, 3);
    assert_eq!(resumed.statistics.succeeded, 2);

    // Rolling back the original three-entry checkpoint restores exactly
    // those three files to their original locations.
    let rollback = rollback_from_checkpoint(&checkpoint_path).unwrap();
    assert_eq!(rollback.restored, 3);
    assert_eq!(rollback.errors, 0);
}

/// Scenario E: a store created fresh migrates straight to the latest
/// schema version, with prior versions backfilled into history.
#[test]
fn scenario_fresh_store_migrates_to_latest_schema() {
    let store = Store::open_in_memory().unwrap();
    let groups = store.get_duplicates().unwrap();
    assert!(groups.is_empty());
}

/// Scenario F: verify is a structural, existence-only audit — it must not
/// be fooled by content changes, only by a missing destination file.
#[test]
fn scenario_verify_is_existence_only_not_content_based() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, b"original").unwrap();
    fs::write(&b, b"original").unwrap();

    let groups = vec![group(
        "hashW",
        ContextTag::Unarchived,
        &[a.to_str().unwrap(), b.to_str().unwrap()],
    )];
    let rows = build_plan_at(&groups, "2026-01-01T00:00:00Z");

    let checkpoint_path = dir.path().join("checkpoint.json");
    let checkpoint = apply_plan(&rows, &checkpoint_path, false).unwrap();
    assert_eq!(checkpoint.statistics.succeeded, 1);

    // Mutate the moved file's content after the fact; verify still passes
    // because it only checks existence.
    fs::write(&checkpoint.moves[0].dst, b"tampered").unwrap();
    let result = verify_checkpoint(&checkpoint_path).unwrap();
    assert!(result.missing.is_empty());

    // Remove it; now verify reports it missing.
    fs::remove_file(&checkpoint.moves[0].dst).unwrap();
    let result = verify_checkpoint(&checkpoint_path).unwrap();
    assert_eq!(result.missing.len(), 1);

    let rollback = rollback_from_checkpoint(&checkpoint_path).unwrap();
    assert_eq!(rollback.errors, 1);
}
