use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Secret error: {0}")]
    Secret(String),

    #[error("HTTP status error: {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Short name of the failure kind, used in one-line status reports
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Io(_) => "IoError",
            Error::Config(_) => "ConfigError",
            Error::Agent(_) => "AgentError",
            Error::Secret(_) => "SecretError",
            Error::HttpStatus { .. } => "HttpStatusError",
            Error::Request(_) => "RequestError",
            Error::Url(_) => "UrlError",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
