//! Stores uploaded files on the local file system.

use std::path::{Path, PathBuf};

use tokio::fs;

pub const DEFAULT_UPLOAD_FOLDER: &str = "imgUpdated";
pub const LISTING_IMAGE_FOLDER: &str = "Imagens/ClassificadoImagens";

/// Writes `bytes` to `<root>/<folder>/<file_name>` and returns the absolute
/// path written. An empty payload writes nothing and yields `None`.
///
/// `file_name` comes straight from the client's content-disposition and is
/// joined as-is: no sanitization, so `..` segments or absolute names escape
/// `folder`, and a second upload with the same name overwrites the first.
pub async fn save_upload(
    root: &Path,
    folder: Option<&str>,
    file_name: &str,
    bytes: &[u8],
) -> std::io::Result<Option<PathBuf>> {
    if bytes.is_empty() {
        return Ok(None);
    }

    let dir = root.join(folder.unwrap_or(DEFAULT_UPLOAD_FOLDER));
    fs::create_dir_all(&dir).await?;

    let full_path = std::path::absolute(dir.join(file_name.trim_matches('"')))?;
    fs::write(&full_path, bytes).await?;
    tracing::debug!(path = %full_path.display(), size = bytes.len(), "file stored");

    Ok(Some(full_path))
}

/// Deletes files stored for a request that did not complete. Failures are
/// logged, never returned.
pub async fn remove_uploads(paths: &[PathBuf]) {
    for path in paths {
        if let Err(err) = fs::remove_file(path).await {
            tracing::warn!(path = %path.display(), error = %err, "failed to remove stored upload");
        }
    }
}
