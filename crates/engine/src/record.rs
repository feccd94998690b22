//! The module contains the `Record` type, one income or expense entry.
use core::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use crate::{Amount, EngineError, ReportError};

/// Column set of the persisted table, in order.
pub const COLUMNS: [&str; 5] = ["date", "type", "category", "amount", "description"];

/// Format of the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Other Expense",
];

const INCOME_CATEGORIES: &[&str] = &["Salary", "Bonus", "Investment", "Gift", "Other Income"];

/// Whether a record is money coming in or going out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Expense,
    Income,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Expense, RecordKind::Income];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        }
    }

    /// The fixed category list valid for this kind.
    #[must_use]
    pub const fn categories(self) -> &'static [&'static str] {
        match self {
            Self::Expense => EXPENSE_CATEGORIES,
            Self::Income => INCOME_CATEGORIES,
        }
    }

    #[must_use]
    pub fn has_category(self, category: &str) -> bool {
        self.categories().contains(&category)
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Expense => Self::Income,
            Self::Income => Self::Expense,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecordKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Expense" => Ok(Self::Expense),
            "Income" => Ok(Self::Income),
            other => Err(EngineError::InvalidKind(other.to_string())),
        }
    }
}

/// Every category, expense ones first.
pub fn all_categories() -> impl Iterator<Item = &'static str> {
    RecordKind::ALL
        .into_iter()
        .flat_map(|kind| kind.categories().iter().copied())
}

/// One saved income or expense entry.
///
/// `date` keeps the text found in the table. Records created by the
/// application always use [`DATE_FORMAT`]; rows edited by hand may not, which
/// is only detected when a date is actually needed (see [`Record::timestamp`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub date: String,
    pub kind: RecordKind,
    pub category: String,
    pub amount: Amount,
    pub description: Option<String>,
}

impl Record {
    pub fn new(
        created_at: NaiveDateTime,
        kind: RecordKind,
        category: impl Into<String>,
        amount: Amount,
        description: Option<String>,
    ) -> Self {
        Self {
            date: created_at.format(DATE_FORMAT).to_string(),
            kind,
            category: category.into(),
            amount,
            description,
        }
    }

    /// Parses the `date` column, accepting a full timestamp or a bare date.
    pub fn timestamp(&self) -> Result<NaiveDateTime, ReportError> {
        let raw = self.date.trim();
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, DATE_FORMAT) {
            return Ok(timestamp);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .ok_or_else(|| ReportError::MalformedDate {
                date: self.date.clone(),
            })
    }

    /// The record as display text, one entry per column of [`COLUMNS`].
    #[must_use]
    pub fn cells(&self) -> [String; 5] {
        [
            self.date.clone(),
            self.kind.label().to_string(),
            self.category.clone(),
            self.amount.to_string(),
            self.description.clone().unwrap_or_default(),
        ]
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date, self.kind, self.category, self.amount
        )?;
        if let Some(description) = &self.description {
            write!(f, " {description}")?;
        }
        Ok(())
    }
}
