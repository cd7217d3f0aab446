use crate::domain::model::{DataPoint, ExtractedSeries, ExtractorKind};
use crate::domain::ports::DataExtractor;
use crate::utils::error::Result;
use csv::{ByteRecord, Reader, ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

pub const KEY_COLUMN: &str = "Key";
pub const VALUE_COLUMN: &str = "Value";

/// Reads comma-separated files whose header names a `Key` and a `Value`
/// column. Rows pass through in file order. Quotes carry no meaning: every
/// comma separates fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvDataExtractor;

fn reader(path: &Path) -> csv::Result<Reader<File>> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .quoting(false)
        .from_path(path)
}

/// Positions of the `Key` and `Value` columns. Header names must match exactly.
fn column_indices(header: &ByteRecord) -> Option<(usize, usize)> {
    let key = header.iter().position(|name| name == KEY_COLUMN.as_bytes())?;
    let value = header.iter().position(|name| name == VALUE_COLUMN.as_bytes())?;
    Some((key, value))
}

impl DataExtractor for CsvDataExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Csv
    }

    fn check_file(&self, path: &Path) -> bool {
        let Ok(mut rdr) = reader(path) else {
            return false;
        };

        let mut header = ByteRecord::new();
        match rdr.read_byte_record(&mut header) {
            Ok(true) => column_indices(&header).is_some(),
            _ => false,
        }
    }

    fn extract_data(&self, path: &Path) -> Result<ExtractedSeries> {
        let mut rdr = reader(path)?;

        let mut header = ByteRecord::new();
        if !rdr.read_byte_record(&mut header)? {
            return Ok(Vec::new());
        }
        let Some((key_index, value_index)) = column_indices(&header) else {
            return Ok(Vec::new());
        };
        let required = key_index.max(value_index) + 1;

        let mut points = Vec::new();
        for (line, record) in rdr.byte_records().enumerate() {
            let record = record?;
            if record.len() < required {
                tracing::debug!("Skipping line {}: {} fields, need {}", line + 2, record.len(), required);
                continue;
            }

            let label = String::from_utf8_lossy(&record[key_index]);
            let raw_value = String::from_utf8_lossy(&record[value_index]);
            let raw_value = raw_value.trim();
            let value = raw_value.parse::<f64>().unwrap_or_else(|_| {
                tracing::warn!("Line {}: '{}' is not a number, counted as 0", line + 2, raw_value);
                0.0
            });
            points.push(DataPoint::new(label.trim(), value));
        }

        Ok(points)
    }
}
