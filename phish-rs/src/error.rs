use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhishError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scaler parameter error: {0}")]
    Scaler(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Invalid snapshot payload: {0}")]
    Snapshot(String),
}

pub type Result<T> = std::result::Result<T, PhishError>;
