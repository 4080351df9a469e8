use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Serve files from `dir`, answering any path that is not a file there with
/// the landing page so in-page anchors and client routes keep working.
pub fn landing_page_service(dir: &Path, index_path: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(index_path))
}
