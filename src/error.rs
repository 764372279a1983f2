use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrimsError {
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),
    #[error("buffer length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("broadcast vector too short: need {expected} entries, got {actual}")]
    VectorLength { expected: usize, actual: usize },
}

pub type PrimsResult<T> = Result<T, PrimsError>;
