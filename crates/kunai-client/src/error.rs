use thiserror::Error;

/// Errors raised while issuing a request
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error(transparent)]
    Network(#[from] reqwest::Error),

    #[error("Request body serialization: {0}")]
    Body(#[from] quick_xml::Error),
}

pub type TransportResult<T> = std::result::Result<T, TransportError>;
