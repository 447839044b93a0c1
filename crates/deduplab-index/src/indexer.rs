use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use deduplab_classify::{classify, resolve_mime};
use deduplab_store::FileRecord;
use rayon::prelude::*;

use crate::progress::ProgressSink;

/// Per-file job: fingerprint, stat, classify, resolve MIME. Failures are
/// logged and the file is dropped from the batch — never propagated, per
/// the Indexer's recovery contract.
fn process_one(path: &Path) -> Option<FileRecord> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(err) => {
            tracing::warn!(?path, %err, "failed to stat file, dropping");
            return None;
        }
    };

    let sha256 = match deduplab_hash::fingerprint_file(path) {
        Ok(digest) => digest,
        Err(err) => {
            tracing::warn!(?path, %err, "failed to hash file, dropping");
            return None;
        }
    };

    let mtime = metadata
        .modified()
        .ok()
        .and_then(|m| m.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);

    Some(FileRecord {
        path: path.to_string_lossy().into_owned(),
        size: metadata.len() as i64,
        mtime,
        sha256,
        mime: resolve_mime(path),
        context_tag: classify(path),
    })
}

/// Fans out fingerprint+classify jobs over a bounded worker pool. `parallelism
/// == 0` means auto-detect (hardware thread count), matching rayon's own
/// `num_threads(0)` semantics. Returns records in unspecified order, plus
/// wall-clock duration and the input file count — downstream components
/// (Store upsert) must not depend on ordering.
pub fn index(
    paths: &[PathBuf],
    parallelism: usize,
    sink: &dyn ProgressSink,
) -> (Vec<FileRecord>, std::time::Duration, usize) {
    let start = Instant::now();
    let total = paths.len() as u64;
    let processed = AtomicU64::new(0);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism)
        .build()
        .unwrap_or_else(|_| rayon::ThreadPoolBuilder::new().build().expect("default pool"));

    let records: Vec<FileRecord> = pool.install(|| {
        paths
            .par_iter()
            .filter_map(|path| {
                let result = process_one(path);
                let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
                sink.on_file_done(done, total);
                result
            })
            .collect()
    });

    sink.finish();

    (records, start.elapsed(), paths.len())
}
