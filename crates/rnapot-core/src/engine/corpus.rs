use super::error::EngineError;
use crate::core::io::structure::StructureFormat;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lists the structure files directly inside `dir`, sorted by path.
///
/// Only regular files with a recognized structure extension are kept. Files whose name
/// appears in `exclude` are dropped.
///
/// # Errors
///
/// [`EngineError::MissingInput`] if `dir` is not a directory, [`EngineError::EmptyCorpus`] if
/// nothing eligible remains, [`EngineError::Io`] if the directory cannot be listed.
pub fn discover_structures(dir: &Path, exclude: &[String]) -> Result<Vec<PathBuf>, EngineError> {
    if !dir.is_dir() {
        return Err(EngineError::MissingInput {
            path: dir.to_path_buf(),
        });
    }

    let io_error = |source| EngineError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if !path.is_file() || StructureFormat::from_path(&path).is_none() {
            continue;
        }
        let excluded = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| exclude.iter().any(|e| e == name));
        if excluded {
            debug!(?path, "Excluding structure by name.");
            continue;
        }
        paths.push(path);
    }

    if paths.is_empty() {
        return Err(EngineError::EmptyCorpus {
            path: dir.to_path_buf(),
        });
    }

    paths.sort();
    debug!(count = paths.len(), ?dir, "Discovered structure files.");
    Ok(paths)
}

/// Display name of a structure: its file name, falling back to the full path.
pub fn structure_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
