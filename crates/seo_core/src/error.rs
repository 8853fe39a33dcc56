use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Enrichment error: {0}")]
    Enrichment(String),

    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Errors that end a run without writing an artifact.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::MissingInput(_)
                | Error::InvalidUrl(_)
                | Error::Extraction(_)
                | Error::Discovery(_)
                | Error::Storage(_)
                | Error::Io(_)
                | Error::Serialization(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
