use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormdataError {
    #[error("Search error: {0}")]
    Search(#[from] crate::search::SearchError),
    #[error("Transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Init Logging error: {0}")]
    InitLogging(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, NormdataError>;
