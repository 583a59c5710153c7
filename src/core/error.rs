use thiserror::Error;

/// Errors raised at the crate boundary: loading configuration and turn input.
///
/// The turn step itself never fails; its edge cases degrade to
/// "no assignment" instead.
#[derive(Error, Debug)]
pub enum FrontError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid turn input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, FrontError>;
