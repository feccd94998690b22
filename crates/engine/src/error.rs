//! The module contains the errors the engine can throw.
//!
//! They follow the four ways an operation can go wrong:
//!
//! - [`EngineError`] when the persisted table cannot be read or appended to.
//! - [`ValidationError`] when the entry form holds bad input.
//! - [`ReportError`] when a dashboard chart cannot be computed.
//! - [`ExportError`] when an export fails, either because the format is not
//!   compiled in or because writing failed.
use std::{io, path::PathBuf};

use thiserror::Error;

/// Record store errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("corrupt record table at line {line}: {reason}")]
    Corrupt { line: u64, reason: String },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid record type: \"{0}\"")]
    InvalidKind(String),
}

/// Entry form validation errors. The first failing check wins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a category.")]
    MissingCategory,
    #[error("\"{category}\" is not a {kind} category.")]
    UnknownCategory { kind: String, category: String },
    #[error("Amount must be a valid number.")]
    InvalidAmount,
    #[error("Amount must be a positive number.")]
    NonPositiveAmount,
}

/// Dashboard aggregation errors, reported per chart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("malformed date \"{date}\"")]
    MalformedDate { date: String },
    #[error("{what} total overflows")]
    Overflow { what: String },
}

/// Export errors.
///
/// [`Unavailable`] means the format was not compiled into this build, so
/// retrying will not help; every other variant is a failure while writing.
///
/// [`Unavailable`]: ExportError::Unavailable
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("{format} export is not available in this build (enable the `{feature}` feature)")]
    Unavailable {
        format: &'static str,
        feature: &'static str,
    },
    #[error("I/O error while exporting to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[cfg(feature = "xlsx")]
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[cfg(feature = "pdf")]
    #[error("document error: {0}")]
    Pdf(#[from] printpdf::Error),
}

impl ExportError {
    /// Returns `true` when the export capability itself is missing.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
