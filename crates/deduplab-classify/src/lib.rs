//! Path-structural context classification and extension-driven MIME
//! resolution. Neither component inspects file content.

mod context;
mod mime;

pub use context::{classify, ContextTag, ARCHIVE_EXTENSIONS};
pub use mime::resolve_mime;
