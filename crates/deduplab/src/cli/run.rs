use anyhow::Context;

use deduplab_config::Config;
use deduplab_index::{index, NoopSink};
use deduplab_plan::{build_plan, write_plan_csv};
use deduplab_store::Store;

use super::app::{Metrics, Plan, RenameApply, Rollback, Scan, Verify};

/// Exit code signaling a post-operation integrity failure: apply errors,
/// missing files on verify, or rollback errors.
pub const EXIT_INTEGRITY_FAILURE: i32 = 5;

pub fn cmd_scan(args: &Scan, cfg: &Config) -> anyhow::Result<i32> {
    let mut store = Store::open(&cfg.db_path).context("opening store")?;

    let files = deduplab_walk::walk(&args.roots, &cfg.ignore_patterns).context("walking roots")?;
    let (records, duration, total) = index(&files, cfg.parallelism, &NoopSink);

    store.upsert_files(&records).context("upserting records")?;
    store.record_run("scan").context("recording run")?;

    tracing::info!(
        files = total,
        indexed = records.len(),
        duration_s = duration.as_secs_f64(),
        db_path = %cfg.db_path.display(),
        "scan complete"
    );
    println!(
        "[scan] files={total} indexed={} duration_s={:.3} -> {}",
        records.len(),
        duration.as_secs_f64(),
        cfg.db_path.display()
    );

    Ok(0)
}

pub fn cmd_plan(args: &Plan, cfg: &Config) -> anyhow::Result<i32> {
    let store = Store::open(&cfg.db_path).context("opening store")?;
    let groups = store.get_duplicates().context("querying duplicates")?;
    let rows = build_plan(&groups);

    write_plan_csv(&rows, &args.out).context("writing plan CSV")?;

    tracing::info!(
        duplicate_groups = groups.len(),
        planned_ops = rows.len(),
        out = %args.out.display(),
        "plan complete"
    );
    println!(
        "[plan] duplicate_groups={} planned_ops={} -> {}",
        groups.len(),
        rows.len(),
        args.out.display()
    );

    Ok(0)
}

pub fn cmd_apply(args: &RenameApply, cfg: &Config) -> anyhow::Result<i32> {
    let rows = deduplab_plan::read_plan_csv(&args.plan).context("reading plan CSV")?;
    let dry_run = cfg.dry_run && !args.force;

    let checkpoint =
        deduplab_apply::apply_plan(&rows, &args.checkpoint, dry_run).context("applying plan")?;

    tracing::info!(
        attempted = checkpoint.statistics.attempted,
        succeeded = checkpoint.statistics.succeeded,
        skipped = checkpoint.statistics.skipped,
        errors = checkpoint.statistics.errors,
        bytes_moved = checkpoint.statistics.bytes_moved,
        dry_run,
        checkpoint = %args.checkpoint.display(),
        "apply complete"
    );
    println!(
        "[apply] {:?} dry_run={dry_run} checkpoint={}",
        checkpoint.statistics,
        args.checkpoint.display()
    );

    Ok(if checkpoint.statistics.errors == 0 {
        0
    } else {
        EXIT_INTEGRITY_FAILURE
    })
}

pub fn cmd_rollback(args: &Rollback) -> anyhow::Result<i32> {
    let result =
        deduplab_apply::rollback_from_checkpoint(&args.checkpoint).context("rolling back")?;
    println!("[rollback] {result:?}");
    Ok(if result.errors == 0 { 0 } else { EXIT_INTEGRITY_FAILURE })
}

pub fn cmd_verify(args: &Verify) -> anyhow::Result<i32> {
    let result = deduplab_apply::verify_checkpoint(&args.checkpoint).context("verifying")?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(if result.missing.is_empty() { 0 } else { EXIT_INTEGRITY_FAILURE })
}

pub fn cmd_metrics(_args: &Metrics, cfg: &Config) -> anyhow::Result<i32> {
    // Metrics accumulation is an external collaborator (spec.md §1); this
    // just surfaces whatever the exporter last wrote, if anything.
    match std::fs::read_to_string(&cfg.metrics_path) {
        Ok(contents) => println!("{contents}"),
        Err(_) => println!("{{}}"),
    }
    Ok(0)
}
