/// Error types for slice requests.

use thiserror::Error;

use crate::constants::{STATUS_BAD_REQUEST, STATUS_INTERNAL_ERROR};

/// Failures of a single slice or height-range request.
///
/// None of these are retried; each one is reported back to the caller of
/// that request only.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The height query parameter is missing or not a number.
    #[error("Invalid height parameter: {reason}")]
    InvalidHeightParameter {
        /// What was wrong with the parameter.
        reason: String,
    },

    /// The slicing algorithm produced a polygon that is neither a triangle
    /// nor a quadrilateral.
    #[error("Malformed polygon for tetrahedron {tet_id}: {vertex_count} vertices (expected 3 or 4)")]
    MalformedPolygon {
        /// Tetrahedron the polygon was cut from.
        tet_id: i64,
        /// Number of vertices actually received.
        vertex_count: usize,
    },

    /// The response could not be encoded as JSON.
    #[error("Failed to serialize response: {detail}")]
    SerializationFailure {
        /// Encoder diagnostic.
        detail: String,
    },
}

impl SceneError {
    pub(crate) fn invalid_height(reason: impl Into<String>) -> Self {
        Self::InvalidHeightParameter {
            reason: reason.into(),
        }
    }

    pub(crate) fn serialization(detail: impl Into<String>) -> Self {
        Self::SerializationFailure {
            detail: detail.into(),
        }
    }

    /// HTTP status a host should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidHeightParameter { .. } => STATUS_BAD_REQUEST,
            Self::MalformedPolygon { .. } | Self::SerializationFailure { .. } => STATUS_INTERNAL_ERROR,
        }
    }

    /// Whether the request itself was at fault.
    pub fn is_client_error(&self) -> bool {
        self.status_code() == STATUS_BAD_REQUEST
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

/// Result type for slice requests.
pub type SceneResult<T> = std::result::Result<T, SceneError>;
