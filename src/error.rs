use std::{fmt, path::PathBuf};

use crate::grid::GridShape;

/// The main error type for the shadowpunker crate
#[derive(Debug)]
pub enum ShadowError {
    /// A source file could not be read or parsed as an image or CSV matrix
    InvalidInput { path: PathBuf, reason: String },

    /// Left and right grids ended with different dimensions
    ShapeMismatch { left: GridShape, right: GridShape },

    /// A model parameter is out of its accepted range
    InvalidParameter(String),

    /// Error occurred during I/O operations (output, config files)
    Io(std::io::Error),
}

impl ShadowError {
    pub(crate) fn invalid_input(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        ShadowError::InvalidInput {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_parameter(msg: impl Into<String>) -> Self {
        ShadowError::InvalidParameter(msg.into())
    }
}

impl fmt::Display for ShadowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadowError::InvalidInput { path, reason } => {
                write!(f, "Invalid input {}: {}", path.display(), reason)
            }
            ShadowError::ShapeMismatch { left, right } => write!(
                f,
                "Input images must be same shape: left is {}x{}, right is {}x{}",
                left.0, left.1, right.0, right.1
            ),
            ShadowError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            ShadowError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ShadowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShadowError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ShadowError {
    fn from(err: std::io::Error) -> Self {
        ShadowError::Io(err)
    }
}

// Convenience type alias for Results using ShadowError
pub type Result<T = ()> = std::result::Result<T, ShadowError>;
