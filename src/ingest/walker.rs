use walkdir::WalkDir;
use std::path::{Path, PathBuf};
use crate::error::{Result, TunegraphError};

/// A text file found under a source directory
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub relative_path: String,
    pub absolute_path: PathBuf,
    pub extension: String,
}

/// Discover all statement files under `root`.
///
/// Recursively walks the directory tree and keeps `.txt` and `.md` files
/// (case-insensitive). Results are sorted by relative path so the graph is
/// built in a stable order.
pub fn discover_files(root: &Path) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        if !matches!(extension.as_str(), "txt" | "md") {
            continue;
        }

        let relative_path = path
            .strip_prefix(root)
            .map_err(|_| TunegraphError::Config(
                format!("Failed to compute relative path for: {}", path.display())
            ))?
            .to_string_lossy()
            .replace('\\', "/");

        files.push(SourceFile {
            relative_path,
            absolute_path: path.to_path_buf(),
            extension,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    log::info!("Discovered {} source files in {}", files.len(), root.display());
    Ok(files)
}
