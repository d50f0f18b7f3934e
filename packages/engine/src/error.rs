use parametric_document::ParseError;
use std::path::PathBuf;
use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Fatal engine errors. Only a failed document load halts the pipeline;
/// per-item script failures are recovered into the error log instead.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("load error: {0}")]
    Load(#[from] ParseError),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl EngineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
