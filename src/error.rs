use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected input. The message is returned to the caller verbatim.
    #[error("{0}")]
    Validation(String),

    /// A request parameter the inference backend would refuse.
    #[error("{0}")]
    InvalidParameter(String),

    /// The inference backend failed or replied with an unusable payload.
    #[error("{0}")]
    Upstream(String),

    #[error("API Request Error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON Decode Error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected Error: {0}")]
    Unexpected(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Status code reported to the gateway for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
