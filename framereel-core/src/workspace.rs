//! Working directory resolution and stale-output cleanup.
//!
//! Before a batch starts, every previously generated `noborder` file is
//! removed from the working directory so stale frames cannot end up in the
//! assembled video. The deletion is irreversible.

use crate::error::{CoreError, CoreResult};
use crate::naming::is_noborder_file;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Resolves the working directory to an absolute path.
///
/// Returns [`CoreError::WorkDirNotFound`] if the path does not exist or is
/// not a directory. Any other failure to resolve it (e.g. permission denied)
/// is returned as [`CoreError::Io`].
pub fn resolve_work_dir(path: &Path) -> CoreResult<PathBuf> {
    let resolved = path.canonicalize().map_err(|e| match e.kind() {
        ErrorKind::NotFound | ErrorKind::NotADirectory => {
            CoreError::WorkDirNotFound(path.to_path_buf())
        }
        _ => CoreError::Io(e),
    })?;
    if !resolved.is_dir() {
        return Err(CoreError::WorkDirNotFound(path.to_path_buf()));
    }
    Ok(resolved)
}

/// Lists the generated (`noborder`) files at the top level of `dir`, sorted by name.
pub fn find_noborder_files(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if !path.is_file() {
                return None;
            }

            path.file_name()
                .and_then(|name| name.to_str())
                .filter(|name| is_noborder_file(name))
                .map(|_| path.clone())
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Deletes every generated (`noborder`) file in `dir` and returns the removed paths.
pub fn clean_noborder_files(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let files = find_noborder_files(dir)?;
    for file in &files {
        log::debug!("Removing stale output {}", file.display());
        std::fs::remove_file(file)?;
    }
    if !files.is_empty() {
        log::info!(
            "Removed {} stale noborder file(s) from {}",
            files.len(),
            dir.display()
        );
    }
    Ok(files)
}
