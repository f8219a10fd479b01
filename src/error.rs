use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("Page size must be a positive integer, got {0}")]
    InvalidPageSize(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
