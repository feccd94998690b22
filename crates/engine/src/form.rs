//! Entry form model: the fields a new record is built from, their
//! validation, and the save action.
use chrono::NaiveDateTime;
use thiserror::Error;

use crate::{Amount, EngineError, Record, RecordKind, RecordStore, ValidationError};

/// The editable state of the entry form.
///
/// The category list always follows the selected kind: changing the kind
/// clears the category, so a category from the other list can never be
/// submitted by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    kind: RecordKind,
    category: Option<&'static str>,
    pub amount: String,
    pub description: String,
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self::new(RecordKind::Expense)
    }
}

impl EntryDraft {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            category: None,
            amount: String::new(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    #[must_use]
    pub fn category(&self) -> Option<&'static str> {
        self.category
    }

    /// Categories the current kind allows.
    #[must_use]
    pub fn categories(&self) -> &'static [&'static str] {
        self.kind.categories()
    }

    pub fn set_kind(&mut self, kind: RecordKind) {
        if self.kind != kind {
            self.kind = kind;
            self.category = None;
        }
    }

    /// Selects `category` if it belongs to the current kind.
    pub fn select_category(&mut self, category: &str) -> bool {
        match self.categories().iter().find(|c| **c == category) {
            Some(found) => {
                self.category = Some(found);
                true
            }
            None => false,
        }
    }

    /// Moves the category selection by `step` positions, wrapping around.
    /// From no selection, a forward step lands on the first category and a
    /// backward step on the last.
    pub fn cycle_category(&mut self, step: isize) {
        let options = self.categories();
        let len = options.len() as isize;
        let next = match self.category.and_then(|c| options.iter().position(|o| *o == c)) {
            Some(index) => (index as isize + step).rem_euclid(len),
            None if step >= 0 => 0,
            None => len - 1,
        };
        self.category = options.get(next as usize).copied();
    }

    /// Checks the fields in order; the first failure wins.
    pub fn validate(&self) -> Result<ValidEntry, ValidationError> {
        let category = self.category.ok_or(ValidationError::MissingCategory)?;
        if !self.kind.has_category(category) {
            return Err(ValidationError::UnknownCategory {
                kind: self.kind.label().to_string(),
                category: category.to_string(),
            });
        }

        let amount: Amount = self
            .amount
            .parse()
            .map_err(|_| ValidationError::InvalidAmount)?;
        if !amount.is_positive() {
            return Err(ValidationError::NonPositiveAmount);
        }

        let description = self.description.trim();
        Ok(ValidEntry {
            kind: self.kind,
            category,
            amount,
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }

    /// Clears what a saved record consumed. The kind stays selected.
    pub fn clear_after_save(&mut self) {
        self.category = None;
        self.amount.clear();
        self.description.clear();
    }

    /// Validates, stamps and appends the draft to `store`.
    ///
    /// On success the draft is cleared and the saved record returned; on any
    /// error both the draft and the store are left as they were.
    pub fn submit(
        &mut self,
        store: &mut RecordStore,
        now: NaiveDateTime,
    ) -> Result<Record, SubmitError> {
        let record = self.validate()?.stamp(now);
        store.append(record.clone())?;
        self.clear_after_save();
        Ok(record)
    }
}

/// A draft that passed validation, ready to be stamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEntry {
    pub kind: RecordKind,
    pub category: &'static str,
    pub amount: Amount,
    pub description: Option<String>,
}

impl ValidEntry {
    /// Builds the record, dated `created_at`.
    pub fn stamp(self, created_at: NaiveDateTime) -> Record {
        Record::new(
            created_at,
            self.kind,
            self.category,
            self.amount,
            self.description,
        )
    }
}

/// Why a save did not happen.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("could not save the record: {0}")]
    Store(#[from] EngineError),
}
