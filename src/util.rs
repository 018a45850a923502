use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name of the directory holding the tilesheet.
pub const DATA_DIR: &str = "data";

/// Return the data directory, searching upward from the working directory.
pub fn get_data_dir() -> Result<PathBuf> {
    find_data_dir(Path::new("."), DATA_DIR)
}

/// Check `start` and each of its ancestors for a `marker` subdirectory and
/// return the first one found.
pub fn find_data_dir(start: &Path, marker: &str) -> Result<PathBuf> {
    // Relative starts like "." have no ancestors to walk, so resolve them first.
    let start = start.canonicalize().map_err(|_| Error::ResourceNotFound {
        what: format!("the {} directory", marker),
        path: start.to_path_buf(),
    })?;

    for dir in start.ancestors() {
        let candidate = dir.join(marker);
        if candidate.is_dir() {
            log::debug!("Found data directory at {}", candidate.display());
            return Ok(candidate);
        }
    }

    Err(Error::ResourceNotFound {
        what: format!("the {} directory", marker),
        path: start,
    })
}
