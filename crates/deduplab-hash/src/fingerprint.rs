use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::hasher::{to_hex, Hasher, Sha256Hasher};

/// Chunk size used for all streaming reads in this crate and mirrored by the
/// Applier's copy phase, matching the original scanner's `CHUNK`.
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Streams `path` through SHA-256 in fixed-size chunks and returns the
/// lowercase hex digest. Arbitrary file sizes are supported; nothing is
/// buffered beyond a single chunk.
pub fn fingerprint_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Sha256Hasher::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(to_hex(&hasher.finalize()))
}
