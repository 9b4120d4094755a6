use crate::types::*;
use std::path::{Path, PathBuf};

/// Write the combined archive.
pub async fn save_archive(result: &BatchResult, path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path, &result.archive).await?;
    Ok(())
}

/// Write every artifact as `<dir>/<file_name>.pdf`, creating `dir` if needed.
/// Returns the written paths in batch order.
pub async fn save_documents(result: &BatchResult, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;

    let mut written = Vec::with_capacity(result.items.len());
    for artifact in &result.items {
        let path = dir.join(artifact.archive_path(""));
        tokio::fs::write(&path, &artifact.bytes).await?;
        written.push(path);
    }
    Ok(written)
}
