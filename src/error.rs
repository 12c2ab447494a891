//! Error types for scenario construction
//!
//! The simulation core itself is total: geometric degeneracies count as
//! "no intersection" and unfit grid cells are skipped. Errors only surface
//! where external data enters the crate (mesh vertices, tuning values, files).

use thiserror::Error;

/// Result type alias for dispersim operations
pub type Result<T> = std::result::Result<T, DisperseError>;

/// Main error type for building meshes, packings and scenarios
#[derive(Error, Debug)]
pub enum DisperseError {
    /// Vertex data that cannot be read as a flat triangle list
    #[error("malformed mesh: {0}")]
    MalformedMesh(String),

    /// Tuning value outside its valid domain
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Scenario file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario file could not be parsed
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
