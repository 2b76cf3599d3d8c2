//! Error types for identifier parsing and response decoding.

use thiserror::Error;

/// Reasons a string is not a valid `0x`-prefixed hex identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Input was empty (or only whitespace).
    #[error("identifier is empty")]
    Empty,

    /// Input does not start with `0x`.
    #[error("identifier must start with 0x")]
    MissingPrefix,

    /// Nothing follows the `0x` prefix.
    #[error("identifier has no hex digits after 0x")]
    NoDigits,

    /// More hex digits than a 32-byte address can hold.
    #[error("identifier has {len} hex digits, at most {max} allowed")]
    TooLong {
        /// Number of digits found.
        len: usize,
        /// Maximum number of digits.
        max: usize,
    },

    /// A character outside `[0-9a-fA-F]`.
    #[error("invalid hex character {ch:?} at position {position}")]
    InvalidHex {
        /// The offending character.
        ch: char,
        /// Byte offset of the character within the input.
        position: usize,
    },
}

/// Failures decoding a provider's execution response.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Output contained no JSON object.
    #[error("no JSON object in provider output")]
    MissingJson,

    /// JSON did not match the expected response shape.
    #[error("malformed execution response: {0}")]
    Json(#[from] serde_json::Error),
}
