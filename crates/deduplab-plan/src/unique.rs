use std::path::{Path, PathBuf};

/// If `path` exists on disk, appends ` (i)` before the extension for
/// `i = 1, 2, ...` until a non-existent candidate is found. Idempotent when
/// no filesystem mutation happens between calls, since a non-existent input
/// is returned unchanged.
pub fn ensure_unique(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("file");
    let ext = path.extension().and_then(|e| e.to_str());

    let mut i = 1u32;
    loop {
        let candidate_name = match ext {
            Some(ext) => format!("{stem} ({i}).{ext}"),
            None => format!("{stem} ({i})"),
        };
        let candidate = parent.join(candidate_name);
        if !candidate.exists() {
            return candidate;
        }
        i += 1;
    }
}
