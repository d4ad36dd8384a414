use std::path::Path;

use crate::http::mime::content_type_for;
use crate::http::response::Response;

/// Reads `path` from disk and builds the response for it.
///
/// Every failure to read the file (missing, unreadable, a directory) becomes
/// the 404 response; this function never fails. The file is read afresh on
/// every call.
pub async fn serve_file(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(body) => Response::ok(content_type_for(path), body),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "File not served");
            Response::not_found()
        }
    }
}
