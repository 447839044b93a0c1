use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CheckpointError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoveRecord {
    pub src: String,
    pub dst: String,
    pub size: u64,
    pub timestamp: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Statistics {
    pub attempted: u64,
    pub succeeded: u64,
    pub skipped: u64,
    pub errors: u64,
    pub bytes_moved: u64,
}

/// Durable manifest of a completed apply run; sufficient input for both
/// rollback and verify. `moves` is ordered by application order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Checkpoint {
    pub timestamp: f64,
    pub dry_run: bool,
    pub statistics: Statistics,
    pub moves: Vec<MoveRecord>,
}

impl Checkpoint {
    /// The checkpoint write is unconditional, even in dry-run (with empty
    /// `moves`), so callers always have a record of the attempt.
    pub fn write(&self, path: impl AsRef<Path>) -> std::result::Result<(), CheckpointError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn read(path: impl AsRef<Path>) -> std::result::Result<Self, CheckpointError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
