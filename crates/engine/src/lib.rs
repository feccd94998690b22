//! Domain core of the finance tracker.
//!
//! - [`RecordStore`]: the append-only CSV table and its in-memory copy.
//! - [`EntryDraft`]: entry form fields, validation and the save action.
//! - [`HistoryFilter`]: type/category equality filters for the history.
//! - [`DashboardReport`]: expense-by-category and month-by-type totals.
//! - [`export`]: spreadsheet and PDF exports of the whole dataset.
pub use error::{EngineError, ExportError, ReportError, ValidationError};
pub use filter::{CategoryFilter, HistoryFilter, KindFilter};
pub use form::{EntryDraft, SubmitError, ValidEntry};
pub use money::Amount;
pub use record::{COLUMNS, DATE_FORMAT, Record, RecordKind, all_categories};
pub use report::{
    CategoryBreakdown, CategoryShare, DashboardReport, MonthTotals, MonthlyFlow, YearMonth,
    expense_by_category, monthly_flow,
};
pub use store::RecordStore;

pub mod export;

mod error;
mod filter;
mod form;
mod money;
mod record;
mod report;
mod store;

type ResultEngine<T> = Result<T, EngineError>;
