use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::{COLUMNS, ExportError, Record};

const SHEET_NAME: &str = "Records";

pub(super) fn write(records: &[Record], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in (0u16..).zip(COLUMNS) {
        sheet.write_string(0, col, name)?;
    }

    for (row, record) in (1u32..).zip(records) {
        sheet.write_string(row, 0, &record.date)?;
        sheet.write_string(row, 1, record.kind.label())?;
        sheet.write_string(row, 2, &record.category)?;
        sheet.write_number(row, 3, record.amount.to_f64())?;
        sheet.write_string(row, 4, record.description.as_deref().unwrap_or_default())?;
    }

    workbook.save(path)?;
    Ok(())
}
