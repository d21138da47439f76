use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("User not found: {0}")]
    UserNotFound(u64),

    #[error("Invalid theme: {0} (expected \"light\" or \"dark\")")]
    InvalidTheme(String),

    #[error("Invalid user data: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;
