use std::path::Path;

/// Modern formats not reliably present in a bare extension→MIME table,
/// registered ahead of the fallback map — mirrors the original scanner's
/// one-time `_init_mime_types` registration, done here as a static table
/// rather than runtime mutation of a global (SPEC_FULL.md §A "Global
/// mutable state").
const MODERN_TYPES: &[(&str, &str)] = &[
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("jxl", "image/jxl"),
    ("mkv", "video/x-matroska"),
    ("webm", "video/webm"),
    ("m4v", "video/x-m4v"),
    ("opus", "audio/opus"),
    ("flac", "audio/flac"),
    ("m4a", "audio/mp4"),
    ("aac", "audio/aac"),
    ("epub", "application/epub+zip"),
    ("mobi", "application/x-mobipocket-ebook"),
    ("7z", "application/x-7z-compressed"),
    ("rar", "application/vnd.rar"),
    ("zst", "application/zstd"),
    ("br", "application/x-brotli"),
];

/// Common developer/text extensions the standard registry tends to miss.
const FALLBACK_TYPES: &[(&str, &str)] = &[
    ("md", "text/markdown"),
    ("yaml", "text/yaml"),
    ("yml", "text/yaml"),
    ("toml", "text/toml"),
    ("ini", "text/plain"),
    ("log", "text/plain"),
    ("conf", "text/plain"),
    ("cfg", "text/plain"),
    ("sh", "application/x-sh"),
    ("bash", "application/x-sh"),
    ("zsh", "application/x-sh"),
    ("py", "text/x-python"),
    ("js", "application/javascript"),
    ("ts", "application/typescript"),
    ("jsx", "text/jsx"),
    ("tsx", "text/tsx"),
    ("rs", "text/x-rust"),
    ("go", "text/x-go"),
    ("c", "text/x-c"),
    ("cpp", "text/x-c++"),
    ("h", "text/x-c"),
    ("hpp", "text/x-c++"),
];

/// Well-known extensions, standing in for a system MIME registry: this
/// workspace has no platform mimetypes database to query, so the modern
/// table is consulted first and doubles as the "primary" source.
const STANDARD_TYPES: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("json", "application/json"),
    ("xml", "application/xml"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("mp4", "video/mp4"),
    ("avi", "video/x-msvideo"),
    ("mov", "video/quicktime"),
    ("zip", "application/zip"),
    ("tar", "application/x-tar"),
    ("gz", "application/gzip"),
    ("doc", "application/msword"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("xls", "application/vnd.ms-excel"),
    ("csv", "text/csv"),
];

fn lookup(table: &[(&str, &str)], ext: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, mime)| *mime)
}

/// Resolves `path` to a non-empty MIME string. Never fails: (1) consult the
/// modern-format table, then the standard table; (2) consult the
/// developer/text fallback table; (3) final fallback
/// `application/octet-stream`.
pub fn resolve_mime(path: impl AsRef<Path>) -> String {
    let Some(ext) = path.as_ref().extension().and_then(|e| e.to_str()) else {
        return "application/octet-stream".to_string();
    };
    let ext_lower = ext.to_lowercase();

    lookup(MODERN_TYPES, &ext_lower)
        .or_else(|| lookup(STANDARD_TYPES, &ext_lower))
        .or_else(|| lookup(FALLBACK_TYPES, &ext_lower))
        .unwrap_or("application/octet-stream")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_modern_format() {
        assert_eq!(resolve_mime("photo.webp"), "image/webp");
        assert_eq!(resolve_mime("archive.7z"), "application/x-7z-compressed");
    }

    #[test]
    fn resolves_standard_format() {
        assert_eq!(resolve_mime("doc.pdf"), "application/pdf");
    }

    #[test]
    fn resolves_developer_fallback() {
        assert_eq!(resolve_mime("main.rs"), "text/x-rust");
        assert_eq!(resolve_mime("readme.md"), "text/markdown");
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        assert_eq!(resolve_mime("blob.xyz123"), "application/octet-stream");
    }

    #[test]
    fn no_extension_falls_back_to_octet_stream() {
        assert_eq!(resolve_mime("Makefile"), "application/octet-stream");
    }

    #[test]
    fn case_insensitive_extension() {
        assert_eq!(resolve_mime("IMAGE.WEBP"), "image/webp");
    }
}
