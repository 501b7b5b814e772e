use thiserror::Error;

#[derive(Error, Debug)]
pub enum LapseError {
    #[error("Invalid domain name: {0}")]
    InvalidDomain(String),

    #[error("Registrar lookup failed: {0}")]
    LookupError(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("No expiry row found in registrar response for {0}")]
    ExpiryRowNotFound(String),

    #[error("Unparseable expiry date: {0}")]
    DateParse(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LapseError>;
