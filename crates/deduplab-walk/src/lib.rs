//! Recursive file discovery with exact-component ignore filtering.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A path is skipped if any of its components equals a configured ignore
/// token exactly (not a substring match). This keeps the quarantine
/// directory `.deduplab_duplicates` excludable by adding it to `ignore`
/// so reruns stay idempotent.
fn is_ignored(path: &Path, ignore: &[String]) -> bool {
    path.components().any(|c| {
        let Some(s) = c.as_os_str().to_str() else {
            return false;
        };
        ignore.iter().any(|token| token == s)
    })
}

/// Recursively enumerates regular files under each root. Non-existent roots
/// are silently skipped. `.gitignore`/hidden-file filtering is disabled —
/// this walker only honors the explicit `ignore` component list, never
/// host VCS conventions.
pub fn walk(roots: &[PathBuf], ignore: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for root in roots {
        if !root.exists() {
            continue;
        }

        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .hidden(false);

        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if is_ignored(path, ignore) {
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn discovers_nested_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/b/f.txt"), b"x").unwrap();
        fs::write(dir.path().join("top.txt"), b"y").unwrap();

        let files = walk(&[dir.path().to_path_buf()], &[]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn skips_ignored_component() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".deduplab_duplicates")).unwrap();
        fs::write(dir.path().join(".deduplab_duplicates/dup.txt"), b"x").unwrap();
        fs::write(dir.path().join("keep.txt"), b"y").unwrap();

        let files = walk(
            &[dir.path().to_path_buf()],
            &[".deduplab_duplicates".to_string()],
        )
        .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("keep.txt"));
    }

    #[test]
    fn nonexistent_root_is_silently_skipped() {
        let missing = PathBuf::from("/does/not/exist/anywhere");
        let files = walk(&[missing], &[]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn empty_root_returns_empty() {
        let dir = tempdir().unwrap();
        let files = walk(&[dir.path().to_path_buf()], &[]).unwrap();
        assert!(files.is_empty());
    }
}
