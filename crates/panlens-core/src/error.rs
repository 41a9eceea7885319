//! Error types for panlens.

use thiserror::Error;

/// A point that cannot be represented under a lens mapping.
///
/// These are deterministic domain failures of the projection math. Callers
/// usually treat them as "not visible" and move on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionError {
    /// The point lies behind the camera, where the lens has no image.
    #[error("point is behind the camera")]
    BehindCamera,

    /// The point lies on an axis where the mapping divides by zero.
    #[error("point has a degenerate radius about the lens axis")]
    DegenerateRadius,

    /// A film coordinate lies outside the lens's normalized domain.
    #[error("film coordinate out of range")]
    OutOfRange,
}

/// The main error type for panlens operations.
#[derive(Error, Debug)]
pub enum PanlensError {
    /// A projection or extrusion failed.
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// A lens parameter is outside its valid range.
    #[error("invalid lens parameter: {0}")]
    InvalidParameter(String),

    /// A node reference count was used after the node was deleted.
    #[error("node reference count used after delete")]
    RefCountDeleted,

    /// A node reference count holds an impossible value.
    #[error("node reference count corrupt: {0}")]
    RefCountCorrupt(i32),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for panlens operations.
pub type Result<T> = std::result::Result<T, PanlensError>;
