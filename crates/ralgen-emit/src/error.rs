//! Emission errors.

use std::io;

use thiserror::Error;

/// Errors that can occur while writing artifacts.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("writing artifact `{artifact}`: {source}")]
    Write { artifact: String, source: io::Error },
}
