use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use porthole_core::error::PersistError;
use porthole_core::persist::{load_snapshot, save_snapshot};
use porthole_core::state::PersistedSnapshot;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings file {path} is unusable: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: PersistError,
    },
}

/// Load saved window settings. A missing file is not an error.
pub fn load_from_file(path: &Path) -> Result<Option<PersistedSnapshot>, RunError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(RunError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    load_snapshot(&json)
        .map(Some)
        .map_err(|source| RunError::Persist {
            path: path.to_path_buf(),
            source,
        })
}

pub fn save_to_file(path: &Path, snapshot: &PersistedSnapshot) -> Result<(), RunError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| RunError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let json = save_snapshot(snapshot).map_err(|source| RunError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| RunError::Io {
        path: path.to_path_buf(),
        source,
    })
}
