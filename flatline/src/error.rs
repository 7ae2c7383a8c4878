//! Error types for the text codec.

use std::fmt;

use thiserror::Error;

/// Which half of a UTF-16 surrogate pair was left without its partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surrogate {
    /// A high surrogate that is not followed by a low surrogate.
    Lead,
    /// A low surrogate with no preceding high surrogate.
    Trail,
}

impl fmt::Display for Surrogate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surrogate::Lead => f.write_str("lead"),
            Surrogate::Trail => f.write_str("trail"),
        }
    }
}

/// Errors raised while converting between code units and UTF-8 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The value was neither a string nor a number.
    #[error("illegal value type given to {operation}, expected a string or number but received {found}")]
    InvalidInputType {
        operation: &'static str,
        found: &'static str,
    },

    /// A surrogate code unit appeared without its partner.
    ///
    /// `index` is the position of the offending lead or trail unit.
    #[error("unmatched {kind} surrogate at {index}")]
    MalformedSurrogate { kind: Surrogate, index: usize },
}

/// Convenience Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
