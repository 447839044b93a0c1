use std::path::{Path, PathBuf};

use deduplab_plan::ensure_unique;
use serde::{Deserialize, Serialize};

use crate::checkpoint::Checkpoint;
use crate::error::CheckpointError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RollbackResult {
    pub restored: u64,
    pub errors: u64,
}

/// Walks a checkpoint's moves in reverse, restoring each `dst` back to its
/// original `src` (uniquified if that path has since been reoccupied).
/// Best-effort per entry: one failure does not abort the rest.
pub fn rollback_from_checkpoint(
    checkpoint_path: impl AsRef<Path>,
) -> std::result::Result<RollbackResult, CheckpointError> {
    let checkpoint = Checkpoint::read(checkpoint_path)?;
    let mut result = RollbackResult::default();

    for mv in checkpoint.moves.iter().rev() {
        let current = PathBuf::from(&mv.dst);
        let mut restore_to = PathBuf::from(&mv.src);

        if !current.exists() {
            result.errors += 1;
            tracing::warn!(dst = %mv.dst, "rollback source (prior dst) missing");
            continue;
        }

        if let Some(parent) = restore_to.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                result.errors += 1;
                tracing::error!(?parent, %err, "failed to create rollback destination directory");
                continue;
            }
        }

        if restore_to.exists() {
            restore_to = ensure_unique(&restore_to);
        }

        match std::fs::rename(&current, &restore_to) {
            Ok(()) => result.restored += 1,
            Err(err) => {
                result.errors += 1;
                tracing::error!(?current, ?restore_to, %err, "rollback move failed");
            }
        }
    }

    Ok(result)
}
