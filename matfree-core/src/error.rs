use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatfreeCoreError {
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}
