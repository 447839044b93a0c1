use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use deduplab_plan::{ensure_unique, PlanRow};

use crate::checkpoint::{Checkpoint, MoveRecord, Statistics};
use crate::commit::commit_move;
use crate::error::Result;

fn epoch_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// How many successful moves accumulate before the checkpoint is flushed to
/// disk. A kill between flushes loses at most this many move entries from
/// the on-disk manifest, never the whole batch.
const CHECKPOINT_FLUSH_INTERVAL: usize = 1;

/// Executes PlanRows with `op=move` and `status=planned`; all others are
/// ignored. `dry_run=true` simulates and mutates nothing. Per-row errors
/// never abort the batch. The checkpoint is flushed to `checkpoint_path`
/// eagerly every `CHECKPOINT_FLUSH_INTERVAL` successes (and once more at the
/// end) so a hard kill mid-batch leaves a usable partial manifest rather
/// than none at all.
pub fn apply_plan(rows: &[PlanRow], checkpoint_path: impl AsRef<Path>, dry_run: bool) -> Result<Checkpoint> {
    let checkpoint_path = checkpoint_path.as_ref();
    let mut stats = Statistics::default();
    let mut moves = Vec::new();
    let mut unflushed = 0usize;

    for row in rows {
        if row.op != "move" || row.status != "planned" {
            continue;
        }

        let src = PathBuf::from(&row.src_path);
        let mut dst = PathBuf::from(&row.dst_path);
        stats.attempted += 1;

        if !src.exists() {
            stats.skipped += 1;
            tracing::warn!(?src, "source not found, skipping");
            continue;
        }

        if dst.exists() {
            let original = dst.clone();
            dst = ensure_unique(&dst);
            tracing::info!(?original, new = ?dst, "destination exists, using unique name");
        }

        if dry_run {
            let size = std::fs::metadata(&src).map(|m| m.len()).unwrap_or(0);
            tracing::info!(?src, ?dst, size, "dry-run: would move");
            continue;
        }

        if let Some(parent) = dst.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                stats.errors += 1;
                tracing::error!(?parent, %err, "failed to create destination directory");
                continue;
            }
        }

        match commit_move(&src, &dst) {
            Ok(size) => {
                stats.bytes_moved += size;
                moves.push(MoveRecord {
                    src: src.to_string_lossy().into_owned(),
                    dst: dst.to_string_lossy().into_owned(),
                    size,
                    timestamp: epoch_now(),
                });
                tracing::info!(?src, ?dst, size, "moved");

                unflushed += 1;
                if unflushed >= CHECKPOINT_FLUSH_INTERVAL {
                    stats.succeeded = moves.len() as u64;
                    Checkpoint {
                        timestamp: epoch_now(),
                        dry_run,
                        statistics: stats.clone(),
                        moves: moves.clone(),
                    }
                    .write(checkpoint_path)?;
                    unflushed = 0;
                }
            }
            Err(err) => {
                stats.errors += 1;
                tracing::error!(?src, ?dst, %err, "move failed");
            }
        }
    }

    stats.succeeded = moves.len() as u64;

    let checkpoint = Checkpoint {
        timestamp: epoch_now(),
        dry_run,
        statistics: stats,
        moves,
    };
    checkpoint.write(checkpoint_path)?;

    Ok(checkpoint)
}
