use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use calamine::{Data, DataType, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::table::{DATE_COLUMN, Row, ScheduleTable};

/// How spreadsheet date cells are spelled once loaded, so they compare like
/// the text a CSV export would hold.
const SPREADSHEET_DATE_FORMAT: &str = "%-m/%-d/%y";

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("unexpected schedule file type: {0} (expected csv, json, xlsx, xls or ods)")]
    UnsupportedFormat(String),

    #[error("failed to read schedule file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV schedule {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to parse JSON schedule {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read spreadsheet {path}: {source}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("invalid schedule {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("schedule {0} has no \"Date\" column")]
    MissingDateColumn(PathBuf),
}

/// Supported schedule sources, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleFormat {
    Csv,
    Json,
    Spreadsheet,
}

impl ScheduleFormat {
    pub fn from_path(path: &Path) -> Result<Self, ScheduleError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "xlsx" | "xls" | "ods" => Ok(Self::Spreadsheet),
            other => Err(ScheduleError::UnsupportedFormat(format!(".{other}"))),
        }
    }
}

/// Load a schedule from disk. The result always has a `Date` column.
pub fn load_schedule(path: &Path) -> Result<ScheduleTable, ScheduleError> {
    let format = ScheduleFormat::from_path(path)?;
    debug!(path = %path.display(), ?format, "loading schedule");

    let table = match format {
        ScheduleFormat::Csv => {
            let file = open(path)?;
            read_csv(file, path)?
        }
        ScheduleFormat::Json => {
            let file = open(path)?;
            read_json(file, path)?
        }
        ScheduleFormat::Spreadsheet => read_spreadsheet(path)?,
    };

    if !table.has_column(DATE_COLUMN) {
        return Err(ScheduleError::MissingDateColumn(path.to_path_buf()));
    }

    debug!(rows = table.len(), columns = table.columns.len(), "schedule loaded");
    Ok(table)
}

fn open(path: &Path) -> Result<File, ScheduleError> {
    File::open(path).map_err(|e| ScheduleError::Io { path: path.to_path_buf(), source: e })
}

/// Parse CSV with a header row. Short records leave trailing columns absent.
pub fn read_csv<R: Read>(reader: R, path: &Path) -> Result<ScheduleTable, ScheduleError> {
    let csv_err = |e| ScheduleError::Csv { path: path.to_path_buf(), source: e };

    let mut rdr = ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);

    let columns: Vec<String> =
        rdr.headers().map_err(csv_err)?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(csv_err)?;
        let mut row = Row::new();
        for (column, value) in columns.iter().zip(record.iter()) {
            if !row.has_column(column) {
                row.insert(column.clone(), Some(value.to_string()));
            }
        }
        rows.push(row);
    }

    Ok(ScheduleTable::new(columns, rows))
}

/// Parse JSON in either records form (`[{"Date": ..}, ..]`) or column form
/// (`{"Date": {"0": ..}, ..}` / `{"Date": [..], ..}`).
pub fn read_json<R: Read>(reader: R, path: &Path) -> Result<ScheduleTable, ScheduleError> {
    let value: Value = serde_json::from_reader(reader)
        .map_err(|e| ScheduleError::Json { path: path.to_path_buf(), source: e })?;

    let invalid = |message: &str| ScheduleError::Invalid {
        path: path.to_path_buf(),
        message: message.to_string(),
    };

    match value {
        Value::Array(records) => {
            let mut columns: Vec<String> = Vec::new();
            let mut rows = Vec::with_capacity(records.len());
            for record in records {
                let Value::Object(fields) = record else {
                    return Err(invalid("every record must be a JSON object"));
                };
                let mut row = Row::new();
                for (column, cell) in fields {
                    if !columns.contains(&column) {
                        columns.push(column.clone());
                    }
                    row.insert(column, json_cell(&cell));
                }
                rows.push(row);
            }
            Ok(ScheduleTable::new(columns, rows))
        }
        Value::Object(by_column) => {
            let columns: Vec<String> = by_column.keys().cloned().collect();
            let mut rows: Vec<Row> = Vec::new();
            for (column, cells) in by_column {
                let cells: Vec<Value> = match cells {
                    Value::Array(items) => items,
                    Value::Object(indexed) => column_values_in_index_order(indexed),
                    _ => return Err(invalid("column values must be arrays or objects")),
                };
                if rows.len() < cells.len() {
                    rows.resize_with(cells.len(), Row::new);
                }
                for (row, cell) in rows.iter_mut().zip(cells) {
                    row.insert(column.clone(), json_cell(&cell));
                }
            }
            Ok(ScheduleTable::new(columns, rows))
        }
        _ => Err(invalid("expected an array of records or an object of columns")),
    }
}

/// Sort `{"0": .., "1": .., "10": ..}` numerically when the keys allow it.
fn column_values_in_index_order(indexed: serde_json::Map<String, Value>) -> Vec<Value> {
    let mut entries: Vec<(String, Value)> = indexed.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    });
    entries.into_iter().map(|(_, v)| v).collect()
}

fn json_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            warn!(value = %other, "nested JSON value in schedule cell, keeping raw text");
            Some(other.to_string())
        }
    }
}

/// Read the first worksheet; its first row is the header.
fn read_spreadsheet(path: &Path) -> Result<ScheduleTable, ScheduleError> {
    let sheet_err = |e| ScheduleError::Spreadsheet { path: path.to_path_buf(), source: e };

    let mut workbook = open_workbook_auto(path).map_err(sheet_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ScheduleError::Invalid {
            path: path.to_path_buf(),
            message: "workbook has no worksheets".to_string(),
        })?
        .map_err(sheet_err)?;

    let mut raw_rows = range.rows();
    let Some(header) = raw_rows.next() else {
        return Ok(ScheduleTable::default());
    };

    let columns: Vec<String> =
        header.iter().map(|c| spreadsheet_cell(c).unwrap_or_default()).collect();

    let mut rows = Vec::new();
    for raw in raw_rows {
        let mut row = Row::new();
        for (column, cell) in columns.iter().zip(raw.iter()) {
            if column.is_empty() || row.has_column(column) {
                continue;
            }
            row.insert(column.clone(), spreadsheet_cell(cell));
        }
        rows.push(row);
    }

    Ok(ScheduleTable::new(columns, rows))
}

fn spreadsheet_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.trim().to_string()),
        Data::Int(i) => Some(i.to_string()),
        // Whole numbers come back as floats; hymn numbers must not read "12.0".
        #[allow(clippy::cast_possible_truncation)]
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some((*f as i64).to_string()),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_date() {
            Some(date) => Some(date.format(SPREADSHEET_DATE_FORMAT).to_string()),
            None => Some(cell.to_string()),
        },
        Data::Error(e) => {
            warn!(error = ?e, "spreadsheet cell holds an error value");
            None
        }
        other => Some(other.to_string()),
    }
}
