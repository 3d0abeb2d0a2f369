use thiserror::Error;

use crate::reference::Dataset;

/// Reference data could not be used. Always recovered by falling back to the
/// embedded defaults; never surfaced to the user as a failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReferenceDataUnavailable {
    #[error("could not read `{location}`: {message}")]
    Read { location: String, message: String },
    #[error("request to `{location}` failed: {message}")]
    Request { location: String, message: String },
    #[error("`{location}` answered with HTTP status {status}")]
    HttpStatus { location: String, status: u16 },
    #[error("malformed {dataset} payload: {message}")]
    Malformed { dataset: Dataset, message: String },
    #[error("{0} payload contains no usable entries")]
    Empty(Dataset),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("configuration failure: {0}")]
    Configuration(String),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("runtime failure: {0}")]
    Runtime(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ApplicationError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "config_validation",
            Self::Persistence(_) => "store_connectivity",
            Self::Runtime(_) => "runtime_init",
            Self::InvalidInput(_) => "invalid_input",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) => 2,
            Self::Runtime(_) => 3,
            Self::Persistence(_) => 4,
            Self::InvalidInput(_) => 64,
        }
    }
}
