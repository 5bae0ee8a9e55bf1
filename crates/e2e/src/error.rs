//! Error types for the harness

use reqwest::StatusCode;
use thiserror::Error;

/// Coarse classification callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request could not be built or the remote could not be reached
    Transport,
    /// The body was not JSON or lacked an expected field
    Decode,
    /// A fixture the scenario depends on is unavailable
    Precondition,
    /// Status or field value did not match expectation
    Assertion,
    /// Harness configuration is unusable
    Config,
}

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request body could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Request construction failed: {0}")]
    Construction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Response body (status {status}) is not valid JSON: {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("Response field error: {0}")]
    Field(gamestore_common::Error),

    #[error("Fixture unavailable: {0}")]
    Precondition(String),

    #[error("Unexpected status: expected {expected}, got {actual}")]
    UnexpectedStatus {
        expected: StatusCode,
        actual: StatusCode,
    },

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("Configuration error: {0}")]
    Config(gamestore_common::Error),
}

impl E2eError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            E2eError::Transport(_)
            | E2eError::Encode(_)
            | E2eError::Construction(_)
            | E2eError::Io(_) => ErrorKind::Transport,
            E2eError::Decode { .. } | E2eError::Field(_) => ErrorKind::Decode,
            E2eError::Precondition(_) => ErrorKind::Precondition,
            E2eError::UnexpectedStatus { .. } | E2eError::Assertion(_) => ErrorKind::Assertion,
            E2eError::Config(_) => ErrorKind::Config,
        }
    }

    /// Field that failed to decode, when known
    pub fn field(&self) -> Option<&str> {
        match self {
            E2eError::Field(e) => e.field(),
            _ => None,
        }
    }
}

impl From<gamestore_common::Error> for E2eError {
    fn from(e: gamestore_common::Error) -> Self {
        use gamestore_common::Error as Common;
        match e {
            Common::InvalidConfig(_) | Common::ConfigParse(_) | Common::ConfigEncode(_) => {
                E2eError::Config(e)
            }
            Common::Io(io) => E2eError::Io(io),
            other => E2eError::Field(other),
        }
    }
}

pub type E2eResult<T> = Result<T, E2eError>;
