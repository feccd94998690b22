//! Dashboard aggregations.
//!
//! Two independent summaries are derived from the dataset:
//!
//! - expense totals per category (the pie chart);
//! - totals per calendar month and record type (the grouped bar chart).
//!
//! Each is computed on its own so that a failure in one (for example a row
//! with a malformed date) leaves the other intact.
use core::fmt;
use std::collections::BTreeMap;

use chrono::Datelike;

use crate::{Amount, Record, RecordKind, ReportError};

/// Calendar year-month, ordered chronologically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Month of a record's date.
    pub fn of(record: &Record) -> Result<Self, ReportError> {
        let timestamp = record.timestamp()?;
        Ok(Self::new(timestamp.year(), timestamp.month()))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One pie slice.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: Amount,
    /// Share of the expense total, 0..=100.
    pub percent: f64,
}

/// Expense totals per category, ordered by category name.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryBreakdown {
    pub slices: Vec<CategoryShare>,
    pub total: Amount,
}

impl CategoryBreakdown {
    /// Total for `category`, if it has any expense rows.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<Amount> {
        self.slices
            .iter()
            .find(|slice| slice.category == category)
            .map(|slice| slice.total)
    }
}

/// Sums expense amounts by category.
///
/// Returns `Ok(None)` when there are no expense rows: the chart is skipped,
/// not drawn empty.
pub fn expense_by_category(records: &[Record]) -> Result<Option<CategoryBreakdown>, ReportError> {
    let mut totals: BTreeMap<&str, Amount> = BTreeMap::new();
    for record in records.iter().filter(|r| r.kind == RecordKind::Expense) {
        let entry = totals.entry(record.category.as_str()).or_default();
        *entry = entry
            .checked_add(record.amount)
            .ok_or_else(|| ReportError::Overflow {
                what: record.category.clone(),
            })?;
    }
    if totals.is_empty() {
        return Ok(None);
    }

    let total = totals
        .values()
        .try_fold(Amount::ZERO, |acc, v| acc.checked_add(*v))
        .ok_or_else(|| ReportError::Overflow {
            what: "expense".to_string(),
        })?;
    let slices = totals
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category: category.to_string(),
            total: amount,
            percent: if total.is_positive() {
                amount.to_f64() / total.to_f64() * 100.0
            } else {
                0.0
            },
        })
        .collect();

    Ok(Some(CategoryBreakdown { slices, total }))
}

/// One bar cluster: both types for a month, missing ones at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthTotals {
    pub month: YearMonth,
    pub expense: Amount,
    pub income: Amount,
}

impl MonthTotals {
    fn new(month: YearMonth) -> Self {
        Self {
            month,
            expense: Amount::ZERO,
            income: Amount::ZERO,
        }
    }

    #[must_use]
    pub fn get(&self, kind: RecordKind) -> Amount {
        match kind {
            RecordKind::Expense => self.expense,
            RecordKind::Income => self.income,
        }
    }

    fn slot(&mut self, kind: RecordKind) -> &mut Amount {
        match kind {
            RecordKind::Expense => &mut self.expense,
            RecordKind::Income => &mut self.income,
        }
    }
}

/// Monthly totals per type, ascending by month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlyFlow {
    pub months: Vec<MonthTotals>,
}

impl MonthlyFlow {
    #[must_use]
    pub fn get(&self, month: YearMonth) -> Option<&MonthTotals> {
        self.months.iter().find(|m| m.month == month)
    }

    /// Largest single bar, for scaling.
    #[must_use]
    pub fn max_bar(&self) -> Amount {
        self.months
            .iter()
            .flat_map(|m| [m.expense, m.income])
            .max()
            .unwrap_or(Amount::ZERO)
    }
}

/// Groups every record by (month, type) and pivots to one row per month.
///
/// Any record whose date cannot be parsed fails the whole chart.
pub fn monthly_flow(records: &[Record]) -> Result<Option<MonthlyFlow>, ReportError> {
    let mut months: BTreeMap<YearMonth, MonthTotals> = BTreeMap::new();
    for record in records {
        let month = YearMonth::of(record)?;
        let slot = months
            .entry(month)
            .or_insert_with(|| MonthTotals::new(month))
            .slot(record.kind);
        *slot = slot
            .checked_add(record.amount)
            .ok_or_else(|| ReportError::Overflow {
                what: format!("{month} {}", record.kind),
            })?;
    }
    if months.is_empty() {
        return Ok(None);
    }
    Ok(Some(MonthlyFlow {
        months: months.into_values().collect(),
    }))
}

/// What the dashboard shows for a dataset.
#[derive(Clone, Debug, PartialEq)]
pub enum DashboardReport {
    /// No records at all: an empty-state message, no charts.
    Empty,
    Charts {
        by_category: Result<Option<CategoryBreakdown>, ReportError>,
        by_month: Result<Option<MonthlyFlow>, ReportError>,
    },
}

impl DashboardReport {
    pub fn build(records: &[Record]) -> Self {
        if records.is_empty() {
            return Self::Empty;
        }
        let by_category = expense_by_category(records);
        if let Err(err) = &by_category {
            tracing::error!("category breakdown failed: {err}");
        }
        let by_month = monthly_flow(records);
        if let Err(err) = &by_month {
            tracing::error!("monthly summary failed: {err}");
        }
        Self::Charts {
            by_category,
            by_month,
        }
    }

    /// Every chart error, in display order.
    pub fn errors(&self) -> Vec<&ReportError> {
        match self {
            Self::Empty => Vec::new(),
            Self::Charts {
                by_category,
                by_month,
            } => [by_category.as_ref().err(), by_month.as_ref().err()]
                .into_iter()
                .flatten()
                .collect(),
        }
    }
}
