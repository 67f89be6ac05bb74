use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid regular expression: {0}")]
    Regex(#[from] regex::Error),

    #[error("{path}:{line}: {reason}")]
    Parse {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Link on line {line} references ideogram '{name}', which is not in the karyotype")]
    UnknownIdeogram { name: String, line: usize },

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Insufficient movable ideograms for flip: {movable} movable, at least 2 required")]
    InsufficientMovable { movable: usize },
}

pub type OrderResult<T> = Result<T, OrderError>;

impl OrderError {
    pub fn read(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn write(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.display().to_string(),
            source,
        }
    }
}
