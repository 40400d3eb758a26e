/// Error types for configuration and color parsing.
use thiserror::Error;

/// Errors raised while loading configuration or building values from
/// untrusted input. Nothing on the per-frame path returns one.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid color label: {0:?}")]
    InvalidColor(String),

    /// A matrix was built from rows that do not form a 4x4 grid.
    #[error("Matrix must be 4x4, got {rows} rows with {cols} columns in the first")]
    MatrixShape { rows: usize, cols: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
