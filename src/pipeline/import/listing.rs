use std::path::{Path, PathBuf};

use super::ImportError;
use crate::pipeline::rename::naming::has_date_prefix;

/// Should this path be renamed? Hidden files, directories and files that
/// already carry a `YYYY.MM.DD_` prefix are left alone.
pub fn is_eligible(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with('.') || path.is_dir() {
        return false;
    }
    !has_date_prefix(name)
}

/// Eligible files directly inside `folder`, sorted by name.
pub fn list_eligible_files(folder: &Path) -> Result<Vec<PathBuf>, ImportError> {
    if !folder.exists() {
        return Err(ImportError::FolderNotFound(folder.to_path_buf()));
    }
    if !folder.is_dir() {
        return Err(ImportError::NotADirectory(folder.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if is_eligible(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
