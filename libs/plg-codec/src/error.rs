//! # Codec Errors
//!
//! Error types for PLG encoding and decoding.
//!
//! ## Error Policy
//!
//! - Document-level errors abort the whole operation
//! - Section-level errors are reported by the caller as diagnostics and the
//!   offending section is skipped
//! - Count mismatches between colors and vertices are never errors

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while encoding or decoding PLG data.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but does not have the PLG envelope shape.
    #[error("Malformed document: {message}")]
    MalformedDocument { message: String },

    /// A required envelope field is absent.
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A section could not be read into geometry.
    #[error("Invalid section: {message}")]
    InvalidSection { message: String },

    /// A face references a vertex that does not exist.
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// A flat index list does not describe whole triangles.
    #[error("Index count {count} is not a multiple of 3")]
    NotTriangulated { count: usize },

    /// A polygon loop has fewer than three corners.
    #[error("Polygon {face} has {corners} corners (min: 3)")]
    DegeneratePolygon { face: usize, corners: usize },
}

impl CodecError {
    /// Creates a malformed document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: message.into(),
        }
    }

    /// Creates a missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid section error.
    pub fn invalid_section(message: impl Into<String>) -> Self {
        Self::InvalidSection {
            message: message.into(),
        }
    }

    /// Returns true for errors confined to one section's geometry.
    ///
    /// These are recovered by skipping the section; every other error aborts.
    pub fn is_section_level(&self) -> bool {
        matches!(
            self,
            Self::InvalidSection { .. }
                | Self::IndexOutOfRange { .. }
                | Self::NotTriangulated { .. }
                | Self::DegeneratePolygon { .. }
        )
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
