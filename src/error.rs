use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the input and output collaborators. Building coverage itself
/// never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error")]
    Io(#[from] io::Error),
    #[error("CSV error")]
    Csv(#[from] csv::Error),
    #[error("invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
    #[error("record not found: {0}")]
    RecordNotFound(String),
    #[error("empty input: no {0}")]
    EmptyInput(&'static str),
    #[error("invalid color: {0}")]
    InvalidColor(String),
}
