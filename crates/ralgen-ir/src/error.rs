//! IR construction errors.

use thiserror::Error;

/// Errors raised while constructing IR entities from cell values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IrError {
    #[error("invalid bit range for field `{name}`: hi={hi} lo={lo}")]
    InvalidFieldRange { name: String, hi: u32, lo: u32 },

    #[error("unknown access policy `{text}`")]
    UnknownAccessPolicy { text: String },

    #[error("malformed hexadecimal value `{text}`")]
    MalformedHex { text: String },
}
