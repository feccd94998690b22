use std::fs;

use engine::{
    Amount, Record, RecordKind,
    export::{self, ExportFormat},
};

fn records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| Record {
            date: format!("2024-01-{:02} 12:00:00", i % 28 + 1),
            kind: if i % 2 == 0 {
                RecordKind::Expense
            } else {
                RecordKind::Income
            },
            category: if i % 2 == 0 { "Food" } else { "Salary" }.to_string(),
            amount: Amount::new(1_000 + i as i64),
            description: (i % 3 == 0).then(|| format!("entry number {i}")),
        })
        .collect()
}

/// Reads one XML part out of the written xlsx container.
#[cfg(feature = "xlsx")]
fn workbook_part(path: &std::path::Path, name: &str) -> String {
    use std::io::Read;

    let mut archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let mut xml = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

#[cfg(feature = "xlsx")]
fn cell<'a>(sheet: &'a str, reference: &str) -> &'a str {
    let open = format!("<c r=\"{reference}\"");
    let start = sheet
        .find(&open)
        .unwrap_or_else(|| panic!("no cell {reference}"));
    let len = sheet[start..].find("</c>").unwrap();
    &sheet[start..start + len]
}

#[cfg(feature = "xlsx")]
#[test]
fn spreadsheet_export_writes_a_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");

    let resolved = export::export_spreadsheet(&records(5), &path).unwrap();

    assert!(resolved.is_absolute());
    assert_eq!(resolved, path);
    assert!(fs::read(&path).unwrap().starts_with(b"PK"));

    let workbook = workbook_part(&path, "xl/workbook.xml");
    assert!(workbook.contains("name=\"Records\""));

    let sheet = workbook_part(&path, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains("<dimension ref=\"A1:E6\"/>"));
    assert_eq!(sheet.matches("<row ").count(), 6, "header plus one row per record");

    let amount = cell(&sheet, "D2");
    assert!(!amount.contains("t=\""), "amount must be a numeric cell: {amount}");
    let value = amount.split("<v>").nth(1).unwrap();
    let value: f64 = value.trim_end_matches("</v>").parse().unwrap();
    assert!((value - 10.0).abs() < f64::EPSILON);
    assert!(cell(&sheet, "C2").contains("t=\"s\""));
}

#[cfg(feature = "xlsx")]
#[test]
fn spreadsheet_export_of_empty_dataset_still_writes_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");

    export::export(ExportFormat::Spreadsheet, &[], &path).unwrap();

    assert_eq!(export::table_rows(&[]).len(), 1);
    let sheet = workbook_part(&path, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains("<dimension ref=\"A1:E1\"/>"));
    assert_eq!(sheet.matches("<row ").count(), 1);

    let strings = workbook_part(&path, "xl/sharedStrings.xml");
    for name in ["date", "type", "category", "amount", "description"] {
        assert!(strings.contains(&format!("<t>{name}</t>")), "missing column {name}");
    }
}

#[cfg(feature = "pdf")]
#[test]
fn document_export_writes_a_multi_page_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");

    let resolved = export::export_document(&records(80), &path).unwrap();

    assert_eq!(resolved, path);
    assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));
}

#[cfg(feature = "pdf")]
#[test]
fn document_export_of_empty_dataset_still_writes_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.pdf");

    export::export(ExportFormat::Document, &[], &path).unwrap();

    assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));
}

#[test]
fn export_into_missing_directory_is_not_a_capability_error() {
    let dir = tempfile::tempdir().unwrap();
    for format in [ExportFormat::Spreadsheet, ExportFormat::Document] {
        let path = dir
            .path()
            .join("missing")
            .join(format!("out.{}", format.extension()));
        let err = export::export(format, &records(1), &path).unwrap_err();
        assert_eq!(err.is_unavailable(), !format.is_available());
    }
}
