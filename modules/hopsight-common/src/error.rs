use thiserror::Error;

pub type Result<T> = std::result::Result<T, HopsightError>;

#[derive(Error, Debug)]
pub enum HopsightError {
    #[error("Insufficient posts for analysis: found {found}, minimum required {required}")]
    InsufficientData { found: usize, required: usize },

    #[error("Profile not found: @{0}")]
    NotFound(String),

    #[error("Rate limited by upstream: {0}")]
    RateLimited(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
