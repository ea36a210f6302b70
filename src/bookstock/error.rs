use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookstockError {
    #[error("Storage error: {0}")]
    Storage(std::io::Error),

    #[error("Data file error: {0}")]
    Malformed(serde_json::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, BookstockError>;
