//! Error types for FHIR primitive values

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Text or token does not match the lexical grammar of the type.
    #[error("malformed {type_name} '{input}': {reason}")]
    MalformedInput {
        type_name: &'static str,
        input: String,
        reason: String,
    },

    /// Lexically valid, but a component is outside its domain.
    #[error("{field} out of range: {value} ({reason})")]
    OutOfRange {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A cross-field invariant of a composite value is violated.
    #[error("inconsistent composite: {0}")]
    InconsistentComposite(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Malformed,
    OutOfRange,
    Inconsistent,
    Json,
    Config,
    Io,
}

impl Error {
    pub(crate) fn malformed(
        type_name: &'static str,
        input: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::MalformedInput {
            type_name,
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(
        field: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Error::OutOfRange {
            field,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn inconsistent(message: impl Into<String>) -> Self {
        Error::InconsistentComposite(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedInput { .. } => ErrorKind::Malformed,
            Error::OutOfRange { .. } => ErrorKind::OutOfRange,
            Error::InconsistentComposite(_) => ErrorKind::Inconsistent,
            Error::Json(_) => ErrorKind::Json,
            Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}
