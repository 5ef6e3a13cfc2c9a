//! Storage seam used by the generator.

use std::path::Path;

use crate::error::DtoGenError;

/// The four storage operations generation needs.
///
/// Implementations report failures as `DtoGenError::Filesystem` carrying the
/// path that failed.
pub trait Filesystem {
    /// Create `path` and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns `DtoGenError::Filesystem` if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<(), DtoGenError>;

    fn is_dir(&self, path: &Path) -> bool;

    /// Remove `path` and everything below it.
    ///
    /// # Errors
    ///
    /// Returns `DtoGenError::Filesystem` if the tree cannot be removed.
    fn remove_dir_all(&self, path: &Path) -> Result<(), DtoGenError>;

    /// Write `contents` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns `DtoGenError::Filesystem` if the file cannot be written.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), DtoGenError>;
}

/// `Filesystem` backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

fn wrap(path: &Path) -> impl FnOnce(std::io::Error) -> DtoGenError + '_ {
    move |source| DtoGenError::Filesystem {
        path: path.to_path_buf(),
        source,
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> Result<(), DtoGenError> {
        std::fs::create_dir_all(path).map_err(wrap(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), DtoGenError> {
        std::fs::remove_dir_all(path).map_err(wrap(path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), DtoGenError> {
        std::fs::write(path, contents).map_err(wrap(path))
    }
}
