//! Embedded single-file indexed record store with schema migrations.
//!
//! Single-writer, WAL journal mode, `synchronous=NORMAL`. Concurrent readers
//! from other processes may observe partial batches but never torn rows.

mod error;
mod migrations;
mod record;
mod store;

pub use error::{Error, Result};
pub use record::{DuplicateGroup, FileRecord};
pub use store::Store;
