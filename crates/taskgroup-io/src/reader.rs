//! Reading the input CSV into records.

use std::path::Path;

use taskgroup_core::config::TextEncoding;
use taskgroup_core::constants::{
    COLUMN_COMPANY, COLUMN_ORDER_ID, COLUMN_TASK_NAME, REQUIRED_COLUMNS,
};
use taskgroup_core::errors::InputError;
use taskgroup_core::records::Record;
use tracing::{error, info};

use crate::encoding::{decode, detect_encoding};

/// Parsed input: the header row and one record per data row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputTable {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

/// Read `path`, detecting the encoding unless one is forced.
pub fn read_records(path: &Path, encoding: Option<TextEncoding>) -> Result<InputTable, InputError> {
    let display = path.display().to_string();
    if !path.is_file() {
        return Err(InputError::FileNotFound { path: display });
    }

    let bytes = std::fs::read(path).map_err(|e| InputError::Csv {
        path: display.clone(),
        message: e.to_string(),
    })?;
    let encoding = encoding.unwrap_or_else(|| detect_encoding(&bytes));
    info!(file = %path.display(), encoding = encoding.label(), "reading CSV");

    let text = decode(&bytes, encoding).ok_or_else(|| InputError::Decode {
        path: display.clone(),
        encoding: encoding.label().to_string(),
    })?;

    let table = parse(&text, &display)?;
    info!(
        rows = table.records.len(),
        columns = table.headers.len(),
        "CSV read"
    );
    Ok(table)
}

/// Every required column must appear in `headers`; missing ones are named
/// in [`REQUIRED_COLUMNS`] order.
pub fn validate_columns(headers: &[String]) -> Result<(), InputError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    error!(
        missing = %missing.join(", "),
        required = %REQUIRED_COLUMNS.join(", "),
        "required columns missing"
    );
    Err(InputError::MissingColumns { missing })
}

fn parse(text: &str, path: &str) -> Result<InputTable, InputError> {
    let csv_error = |e: csv::Error| InputError::Csv {
        path: path.to_string(),
        message: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(str::to_string)
        .collect();
    validate_columns(&headers)?;

    let column = |name: &str| headers.iter().position(|h| h == name).unwrap_or(0);
    let (order_id, company, task_name) = (
        column(COLUMN_ORDER_ID),
        column(COLUMN_COMPANY),
        column(COLUMN_TASK_NAME),
    );

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        let field = |index: usize| row.get(index).unwrap_or_default().to_string();
        records.push(Record {
            order_id: field(order_id),
            company: field(company),
            task_name: field(task_name),
            fields: row.iter().map(str::to_string).collect(),
        });
    }

    Ok(InputTable { headers, records })
}
