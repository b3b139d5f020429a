use std::collections::HashMap;
use std::fmt::Display;

use actix_web::http::header;
use actix_web::HttpResponse;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{AppError, Result};

/// Largest upload an import accepts
pub const MAX_IMPORT_BYTES: usize = 15 * 1024 * 1024;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// `(field, header label)` pairs in file order
pub type Columns = &'static [(&'static str, &'static str)];

/// Renders rows as a spreadsheet-friendly CSV: UTF-8 BOM, then a row of labels.
pub fn write_csv<I>(columns: Columns, rows: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::Writer::from_writer(BOM.to_vec());
    writer
        .write_record(columns.iter().map(|(_, label)| *label))
        .map_err(write_error)?;
    for row in rows {
        writer.write_record(&row).map_err(write_error)?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("Failed to finish CSV export: {}", e)))
}

/// Download response for an export
pub fn attachment(filename: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(body)
}

fn write_error(e: csv::Error) -> AppError {
    AppError::internal(format!("Failed to write CSV export: {}", e))
}

pub fn cell(value: &str) -> String {
    value.to_string()
}

pub fn optional_cell<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn flag_cell(value: bool) -> String {
    let text = if value { "Yes" } else { "No" };
    text.to_string()
}

/// One data line of an uploaded file, keyed by field name
#[derive(Debug, Clone)]
pub struct ImportRow {
    /// 1-based line in the file; the header is line 1
    pub number: usize,
    values: HashMap<&'static str, String>,
}

impl ImportRow {
    /// Trimmed value, `None` when the column is missing or blank
    pub fn text(&self, field: &str) -> Option<String> {
        self.values
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Amount with thousands separators and `$` removed; unreadable values are blank
    pub fn decimal(&self, field: &str) -> Option<Decimal> {
        let cleaned: String = self
            .text(field)?
            .chars()
            .filter(|c| *c != ',' && *c != '$')
            .collect();
        cleaned.trim().parse::<Decimal>().ok()
    }

    /// Whole number; `1,200.0` reads as 1200
    pub fn whole(&self, field: &str) -> Option<u32> {
        self.decimal(field)?.trunc().to_u32()
    }

    pub fn flag(&self, field: &str) -> bool {
        matches!(
            self.text(field).map(|v| v.to_ascii_lowercase()).as_deref(),
            Some("1" | "true" | "yes" | "y" | "x")
        )
    }

    /// Choice column holding either a code or a label
    pub fn choice<T>(&self, field: &str, lookup: fn(&str) -> Option<T>) -> Result<Option<T>> {
        match self.text(field) {
            None => Ok(None),
            Some(raw) => lookup(&raw)
                .map(Some)
                .ok_or_else(|| AppError::validation(format!("Unknown {} \"{}\"", field, raw))),
        }
    }
}

fn normalize_header(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn field_for_header(columns: Columns, header: &str) -> Option<&'static str> {
    let header = normalize_header(header);
    columns
        .iter()
        .find(|(field, label)| {
            normalize_header(label) == header || field.replace('_', " ") == header
        })
        .map(|(field, _)| *field)
}

/// Parses an uploaded file. Headers match a column by label or by field name
/// with spaces for underscores; rows whose mapped cells are all blank are dropped.
pub fn read_csv(bytes: &[u8], columns: Columns) -> Result<Vec<ImportRow>> {
    if bytes.len() > MAX_IMPORT_BYTES {
        return Err(AppError::validation("File too large. Maximum size is 15 MB."));
    }

    let bytes = bytes.strip_prefix(BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes)
        .map_err(|_| AppError::validation("File must be UTF-8 encoded CSV"))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let mapping: Vec<Option<&'static str>> = reader
        .headers()
        .map_err(read_error)?
        .iter()
        .map(|header| field_for_header(columns, header))
        .collect();
    if mapping.iter().all(Option::is_none) {
        return Err(AppError::validation("No recognized columns in the header row"));
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(read_error)?;
        let number = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);

        let values: HashMap<&'static str, String> = mapping
            .iter()
            .zip(record.iter())
            .filter_map(|(field, value)| field.map(|f| (f, value.to_string())))
            .collect();
        if values.values().all(|v| v.trim().is_empty()) {
            continue;
        }
        rows.push(ImportRow { number, values });
    }
    Ok(rows)
}

fn read_error(e: csv::Error) -> AppError {
    AppError::validation(format!("Could not read CSV: {}", e))
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportRowError {
    pub row: usize,
    pub message: String,
}

/// Outcome of an import; rows that fail validation are reported, not fatal
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub created: u32,
    pub errors: Vec<ImportRowError>,
}

impl ImportReport {
    /// Validation failures are kept per row; any other error aborts the import.
    pub fn record(&mut self, row: usize, outcome: Result<()>) -> Result<()> {
        match outcome {
            Ok(()) => {
                self.created += 1;
                Ok(())
            }
            Err(AppError::Validation(message)) => {
                self.errors.push(ImportRowError { row, message });
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
