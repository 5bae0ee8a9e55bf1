//! Error types for the game-store harness data layer

use thiserror::Error;

/// Result type alias using the common Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading configuration or walking decoded JSON
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config encode error: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing field `{field}`")]
    MissingField { field: String },

    #[error("Field `{field}` is not {expected}")]
    FieldType { field: String, expected: &'static str },

    #[error("Field `{field}` could not be decoded: {source}")]
    Decode {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Error::MissingField { field: field.into() }
    }

    pub(crate) fn wrong_type(field: impl Into<String>, expected: &'static str) -> Self {
        Error::FieldType {
            field: field.into(),
            expected,
        }
    }

    pub(crate) fn decode(field: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Decode {
            field: field.into(),
            source,
        }
    }

    /// Name of the offending field, for decode errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::MissingField { field }
            | Error::FieldType { field, .. }
            | Error::Decode { field, .. } => Some(field),
            _ => None,
        }
    }
}
