use crate::domain::model::{DataPoint, ExtractedSeries, ExtractorKind};
use crate::domain::ports::DataExtractor;
use crate::utils::error::{ChartError, Result};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Only this many leading bytes are read by `check_file`.
pub const PROBE_BYTES: u64 = 1024;

const DATA_ARRAY_FOUND: &str = "data array found";

/// Reads `{"data": [{"key": ..., "value": ...}, ...]}` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDataExtractor;

/// Walks the root object until the `"data"` key and reports whether its value
/// opens an array. The walk stops at the `[`, so a truncated prefix is enough.
struct DataArrayProbe(bool);

impl<'de> Deserialize<'de> for DataArrayProbe {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(RootVisitor)
    }
}

struct RootVisitor;

impl<'de> Visitor<'de> for RootVisitor {
    type Value = DataArrayProbe;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        while let Some(key) = map.next_key::<String>()? {
            if key == "data" {
                map.next_value::<ArrayStart>()?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(DataArrayProbe(false))
    }
}

struct ArrayStart;

impl<'de> Deserialize<'de> for ArrayStart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ArrayStartVisitor)
    }
}

struct ArrayStartVisitor;

impl<'de> Visitor<'de> for ArrayStartVisitor {
    type Value = ArrayStart;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an array")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, _seq: A) -> std::result::Result<Self::Value, A::Error> {
        // Abort the parse here: the rest of the array may lie past the probe window.
        Err(de::Error::custom(DATA_ARRAY_FOUND))
    }
}

pub(crate) fn has_data_array(prefix: &[u8]) -> bool {
    let mut deserializer = serde_json::Deserializer::from_slice(prefix);
    match DataArrayProbe::deserialize(&mut deserializer) {
        Ok(DataArrayProbe(found)) => found,
        Err(e) => e.to_string().starts_with(DATA_ARRAY_FOUND),
    }
}

fn label_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn number_of(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    number.unwrap_or_else(|| {
        tracing::warn!("Non-numeric value {} counted as 0", value);
        0.0
    })
}

/// Any object carrying both `key` and `value` yields a point.
fn point_from_element(element: &Value) -> Option<DataPoint> {
    let object = element.as_object()?;
    let label = label_of(object.get("key")?);
    let value = number_of(object.get("value")?);
    Some(DataPoint::new(label, value))
}

pub(crate) fn points_from_document(document: &Value) -> Option<ExtractedSeries> {
    let elements = document.get("data")?.as_array()?;
    let points = elements
        .iter()
        .enumerate()
        .filter_map(|(index, element)| {
            let point = point_from_element(element);
            if point.is_none() {
                tracing::debug!("Skipping data[{}]: not an object with key and value", index);
            }
            point
        })
        .collect();
    Some(points)
}

impl DataExtractor for JsonDataExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Json
    }

    fn check_file(&self, path: &Path) -> bool {
        let Ok(file) = File::open(path) else {
            return false;
        };

        let mut prefix = Vec::with_capacity(PROBE_BYTES as usize);
        if file.take(PROBE_BYTES).read_to_end(&mut prefix).is_err() {
            return false;
        }

        has_data_array(&prefix)
    }

    fn extract_data(&self, path: &Path) -> Result<ExtractedSeries> {
        let bytes = std::fs::read(path)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let document: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ChartError::malformed(path.display().to_string(), e.to_string()))?;

        points_from_document(&document).ok_or_else(|| {
            ChartError::malformed(
                path.display().to_string(),
                "root object has no \"data\" array",
            )
        })
    }
}
