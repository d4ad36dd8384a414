//! Content-Type selection by file extension.
//!
//! Only HTML is recognised; everything else is served as opaque bytes.

use std::path::Path;

pub const TEXT_HTML: &str = "text/html";
pub const OCTET_STREAM: &str = "application/octet-stream";

pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm") => {
            TEXT_HTML
        }
        _ => OCTET_STREAM,
    }
}
