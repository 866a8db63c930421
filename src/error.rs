use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CcsettingError {
    #[error("Config Error: {message}")]
    Config { message: String },

    #[error("Parse Error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CcsettingError {
    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        CcsettingError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CcsettingError::Read {
            path: path.into(),
            source,
        }
    }

    /// Path of the offending file, when the error is tied to one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            CcsettingError::Parse { path, .. }
            | CcsettingError::Read { path, .. }
            | CcsettingError::Walk { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn display_localized(&self) -> String {
        match self {
            CcsettingError::Config { message } => {
                t!("errors.config_error", message = message).to_string()
            }
            CcsettingError::Parse { path, message } => t!(
                "errors.parse_error",
                path = path.display(),
                message = message
            )
            .to_string(),
            CcsettingError::Read { path, source } => t!(
                "errors.read_error",
                path = path.display(),
                error = source.to_string()
            )
            .to_string(),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CcsettingError>;
