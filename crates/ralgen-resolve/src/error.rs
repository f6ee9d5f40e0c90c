//! Resolution errors.
//!
//! `SheetNotFound` is the one recoverable case: it is absorbed at the
//! parent/child boundary where the missing peripheral was referenced.
//! Everything else aborts the run carrying the originating sheet and row.

use ralgen_ir::IrError;
use thiserror::Error;

/// Boxed error type crossing the [`crate::BlockSink`] seam.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while resolving the block hierarchy.
///
/// Row numbers count as in the sheet, header row included.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no sheet named `{name}` in the workbook")]
    SheetNotFound { name: String },

    #[error("cyclic peripheral reference: {path}")]
    CyclicReference { path: String },

    #[error("sheet `{sheet}` is missing required column `{column}`")]
    MissingColumn { sheet: String, column: String },

    #[error("sheet `{sheet}` row {row}: malformed {what} cell `{text}`")]
    BadCell {
        sheet: String,
        row: usize,
        what: &'static str,
        text: String,
    },

    #[error("sheet `{sheet}` row {row}: field row with no register started")]
    FieldWithoutRegister { sheet: String, row: usize },

    #[error("sheet `{sheet}` row {row}: {source}")]
    InvalidField {
        sheet: String,
        row: usize,
        source: IrError,
    },

    #[error("emitting block `{block}` failed: {source}")]
    Sink { block: String, source: BoxError },
}
