//! Error taxonomy for grid construction, engine configuration, and pattern I/O.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifeError {
    /// Grid constructed with a zero row or column count.
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    /// Thread or noise count outside the range the engine can run with.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Pattern file could not be read.
    #[error("failed to read pattern file \"{path}\": {source}")]
    MalformedInput {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
