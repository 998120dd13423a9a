use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarbonError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Please type a question first.")]
    EmptyQuestion,
}

impl From<lettre::error::Error> for CarbonError {
    fn from(e: lettre::error::Error) -> Self {
        CarbonError::Mail(e.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for CarbonError {
    fn from(e: lettre::transport::smtp::Error) -> Self {
        CarbonError::Mail(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CarbonError>;
