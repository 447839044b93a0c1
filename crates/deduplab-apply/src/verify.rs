use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::checkpoint::Checkpoint;
use crate::error::CheckpointError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VerifyResult {
    pub checked: u64,
    pub missing: Vec<String>,
}

/// Structural audit only — asserts every recorded move's `dst` still
/// exists. Never re-hashes.
pub fn verify_checkpoint(
    checkpoint_path: impl AsRef<Path>,
) -> std::result::Result<VerifyResult, CheckpointError> {
    let checkpoint = Checkpoint::read(checkpoint_path)?;
    let mut missing = Vec::new();

    for mv in &checkpoint.moves {
        if !Path::new(&mv.dst).exists() {
            missing.push(mv.dst.clone());
        }
    }

    Ok(VerifyResult {
        checked: checkpoint.moves.len() as u64,
        missing,
    })
}
