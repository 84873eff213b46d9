//! Host-level error types for the mon runtime
//!
//! Failures inside the language (type mismatches, unknown identifiers, ...)
//! are ordinary [`Object::Error`](crate::runtime::Object::Error) values and
//! never show up here. This enum covers what can go wrong around the
//! evaluator: loading configuration, decoding an AST handed over by an
//! external parser, and converting a finished evaluation into a Rust result.

use thiserror::Error;

/// mon runtime errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration value rejected by validation
    ///
    /// **Triggered by:** `EvaluatorConfig::validate` or `EvaluatorConfig::from_json`
    /// **Example:** `{"max_call_depth": 0}`
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig {
        /// Offending field name
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// JSON input could not be decoded
    ///
    /// **Triggered by:** malformed configuration or AST documents
    #[error("Deserialization error: {0}")]
    Deserialize(String),

    /// Evaluation finished with an error object
    ///
    /// **Triggered by:** `Object::into_result` on an `Error` object
    /// **Example:** evaluating `5 + true;` then calling `into_result()`
    #[error("Runtime error: {message}")]
    Runtime {
        /// Message carried by the error object
        message: String,
    },

    /// A return wrapper escaped the function or program boundary
    #[error("Return value escaped its function boundary")]
    ReturnOutsideFunction,
}

impl Error {
    /// Create a runtime error with a message
    pub fn runtime(msg: impl Into<String>) -> Self {
        Error::Runtime {
            message: msg.into(),
        }
    }

    /// Create a configuration error for `field`
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Deserialize(err.to_string())
    }
}

/// Result type for mon runtime operations
pub type Result<T> = std::result::Result<T, Error>;
