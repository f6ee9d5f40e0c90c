//! Workbook loading errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a workbook from disk.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("reading workbook directory {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("parsing sheet `{sheet}`: {source}")]
    Csv { sheet: String, source: csv::Error },

    #[error("sheet `{sheet}` has no header row")]
    EmptySheet { sheet: String },

    #[error("workbook directory {path} contains no sheets")]
    NoSheets { path: PathBuf },
}
