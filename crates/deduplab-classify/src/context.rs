use std::path::Path;
use serde::{Deserialize, Serialize};

/// Path-structural context tag. Never derived from file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContextTag {
    Archived,
    Unarchived,
}

impl ContextTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextTag::Archived => "archived",
            ContextTag::Unarchived => "unarchived",
        }
    }
}

impl std::fmt::Display for ContextTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContextTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "archived" => Ok(ContextTag::Archived),
            "unarchived" => Ok(ContextTag::Unarchived),
            other => Err(format!("unknown context tag: {other}")),
        }
    }
}

const EXTRACTION_MARKERS: &[&str] = &[
    "extracted",
    "unzipped",
    "unpacked",
    "unarchived",
    "decompressed",
    "unrar",
    "untar",
];

pub const ARCHIVE_EXTENSIONS: &[&str] = &[
    ".zip", ".7z", ".tar", ".gz", ".bz2", ".xz", ".rar", ".tar.gz", ".tar.bz2", ".tar.xz",
    ".tgz", ".tbz2",
];

fn has_adjacent_archive(ancestor: &Path) -> bool {
    let Some(parent) = ancestor.parent() else {
        return false;
    };
    let Some(name) = ancestor.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    ARCHIVE_EXTENSIONS
        .iter()
        .any(|ext| parent.join(format!("{name}{ext}")).is_file())
}

fn name_contains_archive_token(name_lower: &str) -> bool {
    ARCHIVE_EXTENSIONS.iter().any(|ext| {
        let stripped = ext.trim_start_matches('.').replace('.', "");
        let underscored = ext.trim_start_matches('.').replace('.', "_");
        let underscored = format!("_{underscored}");
        name_lower.contains(&underscored) || name_lower.contains(&stripped)
    })
}

/// Classifies `path` as `archived` or `unarchived` using path structure only.
/// Walks ancestors root-ward and short-circuits on the first ancestor that
/// satisfies any extraction-marker, adjacent-archive, or archive-token rule.
pub fn classify(path: impl AsRef<Path>) -> ContextTag {
    let path = path.as_ref();
    for ancestor in path.ancestors().skip(1) {
        let Some(name) = ancestor.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let name_lower = name.to_lowercase();

        if EXTRACTION_MARKERS.iter().any(|m| name_lower.contains(m)) {
            return ContextTag::Archived;
        }

        if has_adjacent_archive(ancestor) {
            return ContextTag::Archived;
        }

        if name_contains_archive_token(&name_lower) {
            return ContextTag::Archived;
        }
    }

    ContextTag::Unarchived
}
