use thiserror::Error;

/// Failures at the edges of the pipeline. The numerical core itself is
/// infallible.
#[derive(Debug, Error)]
pub enum Error {
    #[error("grid must be non-empty, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("pixel buffer holds {actual} bytes, grid needs {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("field has {actual} cells, grid needs {expected}")]
    FieldSize { expected: usize, actual: usize },

    #[error("could not start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("could not read session config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid session config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
