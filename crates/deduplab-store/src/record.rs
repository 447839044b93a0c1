use deduplab_classify::ContextTag;

/// Row in the Store. Created or replaced wholesale by the Indexer; never
/// mutated in place by any other component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: String,
    pub size: i64,
    pub mtime: i64,
    pub sha256: String,
    pub mime: String,
    pub context_tag: ContextTag,
}

/// `(sha256, context_tag, paths)` with `paths.len() >= 2`. Derived view,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub sha256: String,
    pub context_tag: ContextTag,
    pub paths: Vec<String>,
}
