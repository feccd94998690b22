use std::{fs, path::PathBuf};

use chrono::NaiveDateTime;
use engine::{
    Amount, CategoryFilter, DATE_FORMAT, EngineError, EntryDraft, HistoryFilter, KindFilter,
    Record, RecordKind, RecordStore, SubmitError, ValidationError,
};
use tempfile::TempDir;

const HEADER: &str = "date,type,category,amount,description";

fn table_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("finance_tracker.csv");
    (dir, path)
}

fn at(ts: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(ts, DATE_FORMAT).unwrap()
}

fn draft(kind: RecordKind, category: &str, amount: &str, description: &str) -> EntryDraft {
    let mut draft = EntryDraft::new(kind);
    assert!(draft.select_category(category));
    draft.amount = amount.to_string();
    draft.description = description.to_string();
    draft
}

#[test]
fn missing_table_loads_as_empty_dataset() {
    let (_dir, path) = table_path();

    let store = RecordStore::load(&path).unwrap();

    assert!(store.is_empty());
    assert_eq!(
        store.columns(),
        &["date", "type", "category", "amount", "description"]
    );
    assert!(!path.exists());
}

#[test]
fn first_append_creates_file_with_header() {
    let (_dir, path) = table_path();
    let mut store = RecordStore::load(&path).unwrap();

    let mut form = draft(RecordKind::Expense, "Food", "20", "lunch, with friends");
    form.submit(&mut store, at("2024-01-05 12:30:00")).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        format!("{HEADER}\n2024-01-05 12:30:00,Expense,Food,20.00,\"lunch, with friends\"\n")
    );
}

#[test]
fn sequential_saves_are_append_only() {
    let (_dir, path) = table_path();
    let mut store = RecordStore::load(&path).unwrap();
    let mut snapshots = Vec::new();

    for (i, amount) in ["1", "2.5", "3,75"].into_iter().enumerate() {
        let mut form = draft(RecordKind::Income, "Gift", amount, "");
        form.submit(&mut store, at(&format!("2024-03-0{} 08:00:00", i + 1)))
            .unwrap();
        snapshots.push(fs::read_to_string(&path).unwrap());
    }

    assert_eq!(store.len(), 3);
    let lines: Vec<_> = snapshots[2].lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], HEADER);
    for pair in snapshots.windows(2) {
        assert!(pair[1].starts_with(&pair[0]), "a persisted row changed");
    }

    let amounts: Vec<_> = store.records().iter().map(|r| r.amount.cents()).collect();
    assert_eq!(amounts, vec![100, 250, 375]);

    let reloaded = RecordStore::load(&path).unwrap();
    assert_eq!(reloaded.records(), store.records());
}

#[test]
fn invalid_drafts_change_nothing() {
    let (_dir, path) = table_path();
    let mut store = RecordStore::load(&path).unwrap();
    draft(RecordKind::Expense, "Bills", "80", "")
        .submit(&mut store, at("2024-01-01 00:00:00"))
        .unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let mut no_category = EntryDraft::new(RecordKind::Expense);
    no_category.amount = "5".to_string();
    let cases = [
        (draft(RecordKind::Expense, "Food", "0", ""), ValidationError::NonPositiveAmount),
        (draft(RecordKind::Expense, "Food", "-2", ""), ValidationError::NonPositiveAmount),
        (draft(RecordKind::Expense, "Food", "ten", ""), ValidationError::InvalidAmount),
        (no_category, ValidationError::MissingCategory),
    ];

    for (mut form, expected) in cases {
        let kept = form.clone();
        let err = form
            .submit(&mut store, at("2024-01-02 00:00:00"))
            .unwrap_err();
        assert!(matches!(err, SubmitError::Validation(ref e) if *e == expected));
        assert_eq!(form, kept, "form contents must be preserved");
    }

    assert_eq!(store.len(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn failed_write_leaves_memory_untouched() {
    let (_dir, path) = table_path();
    let mut store = RecordStore::load(&path).unwrap();
    // a directory cannot be opened for appending
    fs::create_dir(&path).unwrap();
    let mut form = draft(RecordKind::Expense, "Food", "4", "");

    let err = form.submit(&mut store, at("2024-01-02 00:00:00")).unwrap_err();

    assert!(matches!(err, SubmitError::Store(_)));
    assert!(store.is_empty());
    assert_eq!(form.amount, "4");
}

#[test]
fn append_repairs_missing_trailing_newline() {
    let (_dir, path) = table_path();
    fs::write(
        &path,
        format!("{HEADER}\n2024-01-05 10:00:00,Expense,Food,20.0,"),
    )
    .unwrap();

    let mut store = RecordStore::load(&path).unwrap();
    draft(RecordKind::Income, "Salary", "1000", "")
        .submit(&mut store, at("2024-01-10 09:00:00"))
        .unwrap();

    let reloaded = RecordStore::load(&path).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.records()[1].category, "Salary");
}

#[test]
fn externally_written_rows_load() {
    let (_dir, path) = table_path();
    fs::write(
        &path,
        format!(
            "{HEADER}\n2024-01-05,Expense,Food,20.0,\n2024-01-10 09:00:00,Income,Salary,1000,march\n"
        ),
    )
    .unwrap();

    let store = RecordStore::load(&path).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.records()[0].date, "2024-01-05");
    assert_eq!(store.records()[0].description, None);
    assert_eq!(store.records()[1].amount, Amount::new(100_000));
    assert_eq!(store.records()[1].description.as_deref(), Some("march"));
}

#[test]
fn rows_with_extra_precision_load_unchanged() {
    let (_dir, path) = table_path();
    fs::write(
        &path,
        format!(
            "{HEADER}\n2024-01-05 08:00:00,Expense,Food,10.125,\n2024-01-06 08:00:00,Expense,Other Expense,1e-05,rounding\n"
        ),
    )
    .unwrap();

    let store = RecordStore::load(&path).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.records()[0].amount.to_string(), "10.125");
    assert_eq!(store.records()[1].amount.to_string(), "0.00001");
    assert!(store.records()[1].amount.is_positive());
}

#[test]
fn three_decimal_amount_is_saved_as_typed() {
    let (_dir, path) = table_path();
    let mut store = RecordStore::load(&path).unwrap();

    let mut form = draft(RecordKind::Expense, "Food", "12.345", "");
    let entry = form.validate().unwrap();
    assert_eq!(entry.amount.to_string(), "12.345");

    form.submit(&mut store, at("2024-03-01 12:00:00")).unwrap();

    let on_disk = fs::read_to_string(&path).unwrap();
    assert!(on_disk.ends_with("2024-03-01 12:00:00,Expense,Food,12.345,\n"));
    let reloaded = RecordStore::load(&path).unwrap();
    assert_eq!(reloaded.records(), store.records());
}

#[test]
fn corrupt_tables_fail_loudly() {
    let (_dir, path) = table_path();

    fs::write(&path, "when,what\n2024-01-01,x\n").unwrap();
    assert!(matches!(
        RecordStore::load(&path),
        Err(EngineError::Corrupt { line: 1, .. })
    ));

    fs::write(&path, format!("{HEADER}\n2024-01-01 00:00:00,Loan,Food,1,\n")).unwrap();
    assert!(matches!(
        RecordStore::load(&path),
        Err(EngineError::Corrupt { line: 2, .. })
    ));

    fs::write(&path, format!("{HEADER}\n2024-01-01 00:00:00,Expense,Food,lots,\n")).unwrap();
    assert!(matches!(
        RecordStore::load(&path),
        Err(EngineError::Corrupt { line: 2, .. })
    ));

    fs::write(&path, format!("{HEADER}\n2024-01-01 00:00:00,Expense\n")).unwrap();
    assert!(matches!(RecordStore::load(&path), Err(EngineError::Csv(_))));
}

fn record(kind: RecordKind, category: &str, cents: i64) -> Record {
    Record::new(
        at("2024-01-01 00:00:00"),
        kind,
        category,
        Amount::new(cents),
        None,
    )
}

#[test]
fn expense_filter_keeps_only_expenses_in_order() {
    let records = vec![
        record(RecordKind::Expense, "Food", 1),
        record(RecordKind::Income, "Salary", 2),
        record(RecordKind::Expense, "Bills", 3),
        record(RecordKind::Income, "Gift", 4),
        record(RecordKind::Expense, "Food", 5),
    ];
    let original = records.clone();

    let filter = HistoryFilter::new(KindFilter::Only(RecordKind::Expense), CategoryFilter::All);
    let shown: Vec<_> = filter.apply(&records).iter().map(|r| r.amount.cents()).collect();

    assert_eq!(shown, vec![1, 3, 5]);
    assert_eq!(filter.positions(&records), vec![0, 2, 4]);
    assert_eq!(records, original);
}

#[test]
fn filters_combine_with_and() {
    let records = vec![
        record(RecordKind::Expense, "Food", 1),
        record(RecordKind::Income, "Gift", 2),
        record(RecordKind::Expense, "Bills", 3),
    ];

    let food = HistoryFilter::new(
        KindFilter::Only(RecordKind::Expense),
        CategoryFilter::Only("Food".to_string()),
    );
    assert_eq!(food.positions(&records), vec![0]);

    let contradiction = HistoryFilter::new(
        KindFilter::Only(RecordKind::Income),
        CategoryFilter::Only("Food".to_string()),
    );
    assert!(contradiction.apply(&records).is_empty());

    assert_eq!(HistoryFilter::default().apply(&records).len(), 3);
}
