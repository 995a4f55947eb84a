use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Window already initialized: {0}")]
    AlreadyInitialized(String),

    #[error("Unknown window: {0}")]
    UnknownWindow(String),
}

pub type ShellResult<T> = Result<T, ShellError>;

impl From<ShellError> for String {
    fn from(e: ShellError) -> Self {
        e.to_string()
    }
}
