//! Streaming content fingerprinting.
//!
//! Computes a SHA-256 digest of a file's byte content in fixed-size chunks,
//! never loading the whole file into memory. Also exposes the incremental
//! `Hasher` trait so the Applier can rehash a temp file during its verify
//! phase without a second pass over the crate's own I/O helpers.

mod error;
mod fingerprint;
mod hasher;

pub use error::{Error, Result};
pub use fingerprint::{fingerprint_file, CHUNK_SIZE};
pub use hasher::{to_hex, Hasher, Sha256Hasher};
