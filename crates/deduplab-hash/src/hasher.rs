use sha2::{Digest, Sha256};

/// Minimal incremental hasher, reused by the Applier's verify-by-rehash phase
/// so a single trait covers both whole-file fingerprinting and streaming
/// verification during a copy.
pub trait Hasher: Send {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> [u8; 32];
}

#[derive(Default)]
pub struct Sha256Hasher(Sha256);

impl Sha256Hasher {
    pub fn new() -> Self {
        Self(Sha256::new())
    }

    pub fn digest(data: &[u8]) -> [u8; 32] {
        Sha256::digest(data).into()
    }
}

impl Hasher for Sha256Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self) -> [u8; 32] {
        self.0.finalize().into()
    }
}

pub fn to_hex(digest: &[u8; 32]) -> String {
    hex::encode(digest)
}
