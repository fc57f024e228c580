//! Error handling logic

use thiserror::Error;

/// Errors raised while validating or running a quantum walk.
///
/// Every failure is local and immediate: nothing is partially computed and
/// handed back when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalkError {
    /// A walk parameter is outside its valid range
    /// (`n_positions <= 0`, `steps < 0`, `start_pos` off the ring).
    #[error("Invalid Parameter: {message}")]
    InvalidParameter {
        /// InvalidParameter failure message
        message: String,
    },

    /// The coin tag names no known coin. Only raised under the strict coin policy.
    #[error("Unrecognized coin type '{tag}'")]
    UnrecognizedCoin {
        /// The tag as supplied by the caller
        tag: String,
    },

    /// A coin that needs angles was requested without any.
    /// Only raised under the strict coin policy.
    #[error("Coin '{coin}' requires at least one angle")]
    MissingAngles {
        /// Wire tag of the coin that was missing its angles
        coin: String,
    },

    /// Total probability drifted away from 1.
    #[error("Incoherence Violation: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// A request body could not be decoded, or a response could not be encoded.
    #[error("Malformed Request: {message}")]
    Request {
        /// Decoder failure message
        message: String,
    },
}

impl WalkError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        WalkError::InvalidParameter { message: message.into() }
    }
}

impl From<serde_json::Error> for WalkError {
    fn from(err: serde_json::Error) -> Self {
        WalkError::Request { message: err.to_string() }
    }
}
