//! Whole-dataset exports.
//!
//! Two targets are supported, each behind a cargo feature:
//!
//! - [`ExportFormat::Spreadsheet`]: an `.xlsx` workbook (feature `xlsx`);
//! - [`ExportFormat::Document`]: a paginated PDF table (feature `pdf`).
//!
//! When a feature is disabled the matching export fails with
//! [`ExportError::Unavailable`] instead of an I/O error.
use std::path::{Path, PathBuf};

use crate::{COLUMNS, ExportError, Record};

#[cfg(feature = "pdf")]
mod pdf;
#[cfg(feature = "xlsx")]
mod xlsx;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Spreadsheet,
    Document,
}

impl ExportFormat {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spreadsheet => "Excel",
            Self::Document => "PDF",
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Spreadsheet => "xlsx",
            Self::Document => "pdf",
        }
    }

    const fn feature(self) -> &'static str {
        match self {
            Self::Spreadsheet => "xlsx",
            Self::Document => "pdf",
        }
    }

    /// Whether this build can produce the format.
    #[must_use]
    pub const fn is_available(self) -> bool {
        match self {
            Self::Spreadsheet => cfg!(feature = "xlsx"),
            Self::Document => cfg!(feature = "pdf"),
        }
    }

    /// The error reported when this build lacks the format.
    #[must_use]
    pub fn unavailable(self) -> ExportError {
        ExportError::Unavailable {
            format: self.label(),
            feature: self.feature(),
        }
    }
}

/// Header row followed by one text row per record.
pub fn table_rows(records: &[Record]) -> Vec<[String; 5]> {
    std::iter::once(COLUMNS.map(str::to_string))
        .chain(records.iter().map(Record::cells))
        .collect()
}

/// Writes `records` to `path` in `format` and returns the absolute path.
pub fn export(format: ExportFormat, records: &[Record], path: &Path) -> Result<PathBuf, ExportError> {
    match format {
        ExportFormat::Spreadsheet => export_spreadsheet(records, path),
        ExportFormat::Document => export_document(records, path),
    }
}

/// Writes `records`, headers included, as a single-sheet workbook.
pub fn export_spreadsheet(records: &[Record], path: &Path) -> Result<PathBuf, ExportError> {
    #[cfg(feature = "xlsx")]
    {
        xlsx::write(records, path)?;
        finish(ExportFormat::Spreadsheet, records, path)
    }
    #[cfg(not(feature = "xlsx"))]
    {
        let _ = (records, path);
        Err(ExportFormat::Spreadsheet.unavailable())
    }
}

/// Writes `records` as a gridded table spread over as many pages as needed.
pub fn export_document(records: &[Record], path: &Path) -> Result<PathBuf, ExportError> {
    #[cfg(feature = "pdf")]
    {
        pdf::write(records, path)?;
        finish(ExportFormat::Document, records, path)
    }
    #[cfg(not(feature = "pdf"))]
    {
        let _ = (records, path);
        Err(ExportFormat::Document.unavailable())
    }
}

#[cfg(any(feature = "xlsx", feature = "pdf"))]
fn finish(format: ExportFormat, records: &[Record], path: &Path) -> Result<PathBuf, ExportError> {
    let resolved = std::path::absolute(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        "exported {} records as {} to {}",
        records.len(),
        format.label(),
        resolved.display()
    );
    Ok(resolved)
}
