use std::error;
use std::fmt;
use std::path::PathBuf;

/// Error type for DTO generation operations.
#[derive(Debug)]
pub enum DtoGenError {
    /// I/O error (e.g., reading the schema file).
    IoError(std::io::Error),

    /// JSON parsing error.
    JsonError(serde_json::Error),

    /// A schema node could not be turned into a shape.
    InvalidSchema {
        /// JSON Pointer to the offending node.
        path: String,
        reason: String,
    },

    /// The output directory would contain the base directory, so clearing it
    /// would delete the project.
    UnsafeOutputDir { path: PathBuf },

    /// The filesystem rejected an operation on `path`.
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DtoGenError {
    pub(crate) fn invalid_schema(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

impl error::Error for DtoGenError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::IoError(io_error) | Self::Filesystem { source: io_error, .. } => Some(io_error),
            Self::JsonError(json_error) => Some(json_error),
            Self::InvalidSchema { .. } | Self::UnsafeOutputDir { .. } => None,
        }
    }
}

impl fmt::Display for DtoGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(io_error) => fmt::Display::fmt(io_error, f),
            Self::JsonError(json_error) => fmt::Display::fmt(json_error, f),
            Self::InvalidSchema { path, reason } => {
                let at: &str = if path.is_empty() { "/" } else { path };
                write!(f, "invalid schema at {at}: {reason}")
            }
            Self::UnsafeOutputDir { path } => write!(
                f,
                "refusing to use {} as output directory: it must be below the base directory",
                path.display()
            ),
            Self::Filesystem { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl From<std::io::Error> for DtoGenError {
    fn from(io_error: std::io::Error) -> Self {
        Self::IoError(io_error)
    }
}

impl From<serde_json::Error> for DtoGenError {
    fn from(json_error: serde_json::Error) -> Self {
        Self::JsonError(json_error)
    }
}
