//! Append-only CSV persistence of records.
//!
//! The file on disk is the source of truth: it is read once by
//! [`RecordStore::load`] and from then on only ever appended to. The store
//! also keeps the full dataset in memory, in insertion order.
use std::{
    fs::{self, File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{Amount, COLUMNS, EngineError, Record, RecordKind, ResultEngine};

/// One line of the persisted table, exactly as it is written.
#[derive(Debug, Serialize, Deserialize)]
struct Row {
    date: String,
    #[serde(rename = "type")]
    kind: String,
    category: String,
    amount: String,
    description: Option<String>,
}

impl From<&Record> for Row {
    fn from(record: &Record) -> Self {
        Self {
            date: record.date.clone(),
            kind: record.kind.label().to_string(),
            category: record.category.clone(),
            amount: record.amount.to_string(),
            description: record.description.clone(),
        }
    }
}

impl TryFrom<Row> for Record {
    type Error = EngineError;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        let kind: RecordKind = row.kind.parse()?;
        let amount: Amount = row.amount.parse()?;
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be > 0, got {amount}"
            )));
        }
        Ok(Self {
            date: row.date,
            kind,
            category: row.category,
            amount,
            description: row.description.filter(|d| !d.trim().is_empty()),
        })
    }
}

/// The persisted table plus its in-memory copy.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<Record>,
}

impl RecordStore {
    /// Reads the whole table at `path`.
    ///
    /// A missing (or empty) file is an empty dataset. A file that exists but
    /// cannot be parsed is an error naming the offending line.
    pub fn load(path: impl Into<PathBuf>) -> ResultEngine<Self> {
        let path = path.into();
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!("no record table at {}, starting empty", path.display());
                return Ok(Self {
                    path,
                    records: Vec::new(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let mut reader = csv::ReaderBuilder::new().from_reader(file);
        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Ok(Self {
                path,
                records: Vec::new(),
            });
        }
        if headers.iter().map(str::trim).ne(COLUMNS) {
            return Err(EngineError::Corrupt {
                line: 1,
                reason: format!(
                    "expected header \"{}\", found \"{}\"",
                    COLUMNS.join(","),
                    headers.iter().collect::<Vec<_>>().join(",")
                ),
            });
        }

        let mut records = Vec::new();
        for raw in reader.records() {
            let raw = raw?;
            let line = raw.position().map_or(0, |pos| pos.line());
            let row: Row = raw.deserialize(Some(&headers))?;
            let record = Record::try_from(row).map_err(|err| EngineError::Corrupt {
                line,
                reason: err.to_string(),
            })?;
            records.push(record);
        }

        tracing::info!("loaded {} records from {}", records.len(), path.display());
        Ok(Self { path, records })
    }

    /// Where the table lives on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The fixed column set of the table.
    #[must_use]
    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    /// All records, in the order they were saved.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends one record to the file, then to the in-memory table.
    ///
    /// The header is written only when the file is new or empty. Existing
    /// rows are never touched. On error the in-memory table is unchanged.
    pub fn append(&mut self, record: Record) -> ResultEngine<()> {
        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(err) if err.kind() == io::ErrorKind::NotFound => true,
            Err(err) => return Err(err.into()),
        };
        if needs_header
            && let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(&self.path)?;
        if !needs_header && !ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(Row::from(&record))?;
        writer.flush()?;

        tracing::debug!("appended record: {record}");
        self.records.push(record);
        Ok(())
    }
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    if file.seek(SeekFrom::End(0))? == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_with_blank_description_has_none() {
        let row = Row {
            date: "2024-01-05 10:00:00".to_string(),
            kind: "Expense".to_string(),
            category: "Food".to_string(),
            amount: "20.0".to_string(),
            description: Some("  ".to_string()),
        };
        let record = Record::try_from(row).unwrap();
        assert_eq!(record.amount, Amount::new(2000));
        assert_eq!(record.description, None);
    }

    #[test]
    fn row_with_zero_amount_is_rejected() {
        let row = Row {
            date: "2024-01-05 10:00:00".to_string(),
            kind: "Income".to_string(),
            category: "Salary".to_string(),
            amount: "0".to_string(),
            description: None,
        };
        assert!(matches!(
            Record::try_from(row),
            Err(EngineError::InvalidAmount(_))
        ));
    }
}
