//! Error types for the AdSel client.
//!
//! # Design
//! `DataFailure` is the only error the service itself produces: any status
//! outside a call's success set lands there together with the URL and raw
//! body, so callers can choose to recover (the filtered activity listing does)
//! or propagate. The remaining variants cover local failures around the call.

use thiserror::Error;

/// Errors returned by the AdSel clients and transports.
#[derive(Debug, Error)]
pub enum AdSelError {
    /// The service answered with a status outside the expected success set.
    #[error("{url} ==> status:{status} data:{body}")]
    DataFailure {
        url: String,
        status: u16,
        body: String,
    },

    /// The request never produced a response (connection refused, timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be decoded into the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A mock data file could not be read.
    #[error("fixture I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Conflict details could not be rendered as CSV.
    #[error("CSV rendering failed: {0}")]
    Csv(String),

    #[error("configuration error: {message}")]
    Config { message: String },
}

impl AdSelError {
    /// HTTP status carried by a `DataFailure`, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AdSelError::DataFailure { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn config<S: Into<String>>(message: S) -> Self {
        AdSelError::Config {
            message: message.into(),
        }
    }
}

impl From<csv::Error> for AdSelError {
    fn from(value: csv::Error) -> Self {
        AdSelError::Csv(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AdSelError>;
