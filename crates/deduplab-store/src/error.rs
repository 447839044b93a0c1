#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create store directory: {0}")]
    OpenDir(#[source] std::io::Error),

    #[error("failed to open store: {0}")]
    Open(#[source] rusqlite::Error),

    #[error("migration v{version} failed: {source}")]
    Migration {
        version: i64,
        #[source]
        source: rusqlite::Error,
    },

    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
