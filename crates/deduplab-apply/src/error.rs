use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("copy failed: {src} -> {tmp}: {source}")]
    Copy {
        src: PathBuf,
        tmp: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fsync failed for {tmp}: {source}")]
    Durability {
        tmp: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("hash mismatch after copy: {src} ({src_hash}) != {tmp} ({tmp_hash})")]
    HashMismatch {
        src: PathBuf,
        tmp: PathBuf,
        src_hash: String,
        tmp_hash: String,
    },

    #[error("atomic rename failed: {tmp} -> {dst}: {source}")]
    Rename {
        tmp: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create destination directory {0}: {1}")]
    CreateDir(PathBuf, #[source] std::io::Error),

    #[error("plan CSV malformed: {0}")]
    PlanParse(#[from] deduplab_plan::Error),

    #[error("checkpoint unreadable or malformed: {0}")]
    Checkpoint(#[from] CheckpointError),
}

#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("checkpoint I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("checkpoint JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
