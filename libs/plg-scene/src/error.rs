//! # Scene Errors
//!
//! Error types for export and import operations.

use std::path::PathBuf;

use plg_codec::CodecError;
use thiserror::Error;

/// Errors that abort an export or import.
///
/// Section-level problems never surface here; they are reported as
/// diagnostics in the operation report.
#[derive(Debug, Error)]
pub enum SceneError {
    /// No object is active in the scene.
    #[error("No active object selected")]
    NoActiveObject,

    /// The active object is not linked to any collection.
    #[error("Active object '{object}' is not in any collection")]
    NotInCollection { object: String },

    /// The input file exceeds the import size limit.
    #[error("File too large: {size} bytes (max: {max})")]
    FileTooLarge { size: u64, max: u64 },

    /// A file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding or decoding failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The host scene refused an operation.
    #[error("Host error: {message}")]
    Host { message: String },
}

impl SceneError {
    /// Creates a host error.
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }

    /// Creates an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for errors caused by the user's selection or input file.
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::NoActiveObject | Self::NotInCollection { .. } | Self::FileTooLarge { .. } => true,
            Self::Codec(err) => !err.is_section_level(),
            Self::Io { .. } | Self::Host { .. } => false,
        }
    }
}

/// Result type alias for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SceneError::NotInCollection {
            object: "Cube".to_string(),
        };
        assert_eq!(err.to_string(), "Active object 'Cube' is not in any collection");

        let err = SceneError::io(
            "/tmp/level.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("/tmp/level.json"));
    }

    #[test]
    fn test_user_error_classification() {
        assert!(SceneError::NoActiveObject.is_user_error());
        assert!(SceneError::Codec(CodecError::missing("PlgDatas")).is_user_error());
        assert!(!SceneError::host("crashed").is_user_error());
    }
}
