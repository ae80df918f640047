use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExecutorError>;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse yaml at {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid progress: {0}")]
    InvalidProgress(String),

    #[error("invalid stage weights: {0}")]
    InvalidWeights(String),

    #[error("invalid training result: {0}")]
    InvalidResult(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ExecutorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn yaml(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Yaml { path: path.into(), source }
    }
}
