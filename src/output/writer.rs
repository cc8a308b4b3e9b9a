//! JSON, CSV and XLSX writer for the record table

use crate::output::traits::{OutputResult, RecordSink};
use crate::record::{BookRecord, COLUMNS};
use rust_xlsxwriter::Workbook;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Byte order mark prepended to the CSV file so spreadsheet tools detect UTF-8
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Name of the single worksheet in the XLSX output
const SHEET_NAME: &str = "books";

/// Writes `<basename>.json`, `<basename>.csv` and `<basename>.xlsx`
#[derive(Debug, Clone)]
pub struct TabularWriter {
    directory: PathBuf,
}

/// A single spreadsheet cell
enum Cell<'a> {
    Text(&'a str),
    Number(u64),
    Empty,
}

impl TabularWriter {
    /// Creates a writer targeting `directory`, which is created on first write
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, basename: &str, extension: &str) -> PathBuf {
        self.directory.join(format!("{}.{}", basename, extension))
    }
}

impl RecordSink for TabularWriter {
    fn write_records(&self, records: &[BookRecord], basename: &str) -> OutputResult<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.directory)?;

        let json_path = self.path_for(basename, "json");
        write_json(records, &json_path)?;

        let csv_path = self.path_for(basename, "csv");
        write_csv(records, &csv_path)?;

        let xlsx_path = self.path_for(basename, "xlsx");
        write_xlsx(records, &xlsx_path)?;

        Ok(vec![json_path, csv_path, xlsx_path])
    }
}

/// Writes an indented JSON array of objects, non-ASCII kept literal
pub fn write_json(records: &[BookRecord], path: &Path) -> OutputResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes a BOM-prefixed UTF-8 CSV with a header row
pub fn write_csv(records: &[BookRecord], path: &Path) -> OutputResult<()> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    if records.is_empty() {
        // serialize() emits the header with the first row; an empty table needs it explicitly
        writer.write_record(COLUMNS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a single-sheet workbook with a header row
pub fn write_xlsx(records: &[BookRecord], path: &Path) -> OutputResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = (index + 1) as u32;
        for (col, cell) in record_cells(record).into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(row, col, text)?;
                }
                Cell::Number(number) => {
                    worksheet.write_number(row, col, number as f64)?;
                }
                Cell::Empty => {}
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Cells of one row, in [`COLUMNS`] order
fn record_cells(record: &BookRecord) -> [Cell<'_>; 14] {
    let optional = |value: Option<u64>| value.map_or(Cell::Empty, Cell::Number);

    [
        Cell::Text(&record.name),
        Cell::Text(&record.writer),
        Cell::Text(&record.translator),
        Cell::Text(&record.publisher),
        Cell::Text(&record.sku),
        Cell::Number(record.price),
        optional(record.pages),
        optional(record.year_shamsi),
        optional(record.year_gregorian),
        optional(record.print_run),
        Cell::Text(&record.trim_size),
        Cell::Text(&record.binding),
        Cell::Text(&record.description),
        Cell::Text(&record.category),
    ]
}
