//! History filtering: two equality predicates combined with AND.
use core::fmt;

use crate::{Record, RecordKind, record::all_categories};

/// Constraint on the record type. `All` keeps every row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    All,
    Only(RecordKind),
}

impl KindFilter {
    pub const OPTIONS: [KindFilter; 3] = [
        KindFilter::All,
        KindFilter::Only(RecordKind::Income),
        KindFilter::Only(RecordKind::Expense),
    ];

    #[must_use]
    pub fn matches(self, kind: RecordKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == kind,
        }
    }

    /// The option after this one in [`KindFilter::OPTIONS`], wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::OPTIONS.iter().position(|o| *o == self).unwrap_or(0);
        Self::OPTIONS[(index + 1) % Self::OPTIONS.len()]
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(kind) => write!(f, "{kind}"),
        }
    }
}

/// Constraint on the category. `All` keeps every row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    /// `All` followed by every known category.
    pub fn options() -> Vec<CategoryFilter> {
        std::iter::once(Self::All)
            .chain(all_categories().map(|c| Self::Only(c.to_string())))
            .collect()
    }

    /// The option after this one in [`CategoryFilter::options`], wrapping.
    #[must_use]
    pub fn next(&self) -> Self {
        let options = Self::options();
        let index = options.iter().position(|o| o == self).unwrap_or(0);
        options[(index + 1) % options.len()].clone()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(category) => f.write_str(category),
        }
    }
}

/// Both history predicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub kind: KindFilter,
    pub category: CategoryFilter,
}

impl HistoryFilter {
    pub fn new(kind: KindFilter, category: CategoryFilter) -> Self {
        Self { kind, category }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.kind == KindFilter::All && self.category == CategoryFilter::All
    }

    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.kind.matches(record.kind) && self.category.matches(&record.category)
    }

    /// Matching records, in dataset order. `records` is never modified.
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Positions of the matching records in `records`, ascending.
    pub fn positions(&self, records: &[Record]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter_map(|(index, r)| self.matches(r).then_some(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_filter_cycles_through_all_options() {
        let mut filter = KindFilter::All;
        let mut seen = vec![filter];
        for _ in 0..3 {
            filter = filter.next();
            seen.push(filter);
        }
        assert_eq!(&seen[..3], &KindFilter::OPTIONS);
        assert_eq!(seen[3], KindFilter::All);
    }

    #[test]
    fn category_options_start_with_all() {
        let options = CategoryFilter::options();
        assert_eq!(options[0], CategoryFilter::All);
        assert_eq!(options[1], CategoryFilter::Only("Food".to_string()));
        assert_eq!(options.len(), 13);
        assert_eq!(
            CategoryFilter::Only("Other Income".to_string()).next(),
            CategoryFilter::All
        );
    }
}
