use crate::domain::model::{DataPoint, ExtractedSeries, ExtractorKind};
use crate::domain::ports::DataExtractor;
use crate::utils::error::{ChartError, Result};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;

const DAY_FORMAT: &str = "%d.%m.%Y";

/// Reads the first table of a SQLite database. Column 0 is a timestamp-like
/// key, column 1 a number; rows are averaged per day and sorted by date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlDataExtractor;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Group {
    pub sum: f64,
    pub count: usize,
}

impl Group {
    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

fn open(path: &Path) -> rusqlite::Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
}

fn first_table(conn: &Connection) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
         ORDER BY rowid LIMIT 1",
        [],
        |row| row.get(0),
    )
    .optional()
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn key_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(*i as f64),
        Value::Real(f) => Some(*f),
        Value::Text(s) => s.trim().parse().ok(),
        Value::Null | Value::Blob(_) => None,
    }
}

/// First whitespace-delimited token of a raw key, e.g. `"12.05.2023 10:00"` -> `"12.05.2023"`.
pub(crate) fn aggregation_key(raw: &str) -> &str {
    raw.split_whitespace().next().unwrap_or("")
}

pub(crate) fn group_rows(rows: impl IntoIterator<Item = (String, f64)>) -> BTreeMap<String, Group> {
    let mut groups: BTreeMap<String, Group> = BTreeMap::new();
    for (raw_key, value) in rows {
        let group = groups
            .entry(aggregation_key(&raw_key).to_string())
            .or_default();
        group.sum += value;
        group.count += 1;
    }
    groups
}

/// Dates first in ascending order, then keys that are not `dd.mm.yyyy` in
/// lexicographic order.
pub(crate) fn sort_by_day(points: &mut ExtractedSeries) {
    points.sort_by_cached_key(|point| {
        let day = NaiveDate::parse_from_str(&point.label, DAY_FORMAT).ok();
        (day.is_none(), day, point.label.clone())
    });
}

pub(crate) fn aggregate(rows: impl IntoIterator<Item = (String, f64)>) -> ExtractedSeries {
    let mut points: ExtractedSeries = group_rows(rows)
        .into_iter()
        .map(|(key, group)| DataPoint::new(key, group.mean()))
        .collect();
    sort_by_day(&mut points);
    points
}

impl DataExtractor for SqlDataExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Sql
    }

    fn check_file(&self, path: &Path) -> bool {
        if !path.is_file() {
            return false;
        }

        match open(path).and_then(|conn| first_table(&conn)) {
            Ok(table) => table.is_some(),
            Err(e) => {
                tracing::debug!("{} is not a usable SQLite database: {}", path.display(), e);
                false
            }
        }
    }

    fn extract_data(&self, path: &Path) -> Result<ExtractedSeries> {
        let conn = open(path)?;
        let Some(table) = first_table(&conn)? else {
            return Ok(Vec::new());
        };
        tracing::debug!("Reading table '{}' from {}", table, path.display());

        let mut stmt = conn.prepare(&format!("SELECT * FROM {}", quote_identifier(&table)))?;
        if stmt.column_count() < 2 {
            return Err(ChartError::malformed(
                path.display().to_string(),
                format!("table '{}' needs a key column and a value column", table),
            ));
        }

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, Value>(0)?, row.get::<_, Value>(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let row_count = rows.len();
        let rows = rows.into_iter().map(|(key, value)| {
            let number = numeric(&value).unwrap_or_else(|| {
                tracing::warn!("Non-numeric value {:?} counted as 0", value);
                0.0
            });
            (key_text(key), number)
        });

        let points = aggregate(rows);
        tracing::debug!("Grouped {} rows into {} days", row_count, points.len());
        Ok(points)
    }
}
