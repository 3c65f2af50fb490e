//! Flat snapshot records as supplied by the data-loading collaborator.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

use super::error::ChartError;

/// Name of the timestamp field in every record.
pub const TIME_FIELD: &str = "Time";

/// One row of the snapshot feed: `Time` plus `BidN`, `BidNSize`, `AskN`, `AskNSize` per level.
///
/// Records are never validated beyond being JSON objects. Field lookups are
/// lenient: a missing or non-numeric field reads as `NaN`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotRecord {
    fields: Map<String, Value>,
}

impl SnapshotRecord {
    /// Wraps an already-parsed JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Builds a record from any JSON value; only objects are accepted.
    pub fn from_value(index: usize, value: Value) -> Result<Self, ChartError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ChartError::InvalidRecord {
                index,
                message: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    /// Numeric value of a field.
    ///
    /// JSON numbers are returned as-is and numeric strings are parsed. Anything
    /// else, including a missing field, yields `NaN`.
    pub fn number(&self, field: &str) -> f64 {
        match self.fields.get(field) {
            Some(Value::Number(number)) => number.as_f64().unwrap_or(f64::NAN),
            Some(Value::String(text)) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }

    /// The `Time` field as text; numbers are rendered, anything else is empty.
    pub fn time(&self) -> String {
        match self.fields.get(TIME_FIELD) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            _ => String::new(),
        }
    }

    /// Raw access to a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Inserts or replaces a field, returning the record for chaining.
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }
}

impl From<Map<String, Value>> for SnapshotRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Converts a sequence of JSON values into records, rejecting non-objects.
pub fn records_from_values<I>(values: I) -> Result<Vec<SnapshotRecord>, ChartError>
where
    I: IntoIterator<Item = Value>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| SnapshotRecord::from_value(index, value))
        .collect()
}

/// Parses a JSON array of records.
pub fn records_from_json(data: &str) -> Result<Vec<SnapshotRecord>, ChartError> {
    let value: Value = serde_json::from_str(data)?;
    match value {
        Value::Array(values) => {
            let records = records_from_values(values)?;
            debug!("parsed {} snapshot records", records.len());
            Ok(records)
        }
        other => Err(ChartError::DeserializationError {
            message: format!("expected a JSON array of records, found {}", json_kind(&other)),
        }),
    }
}

/// Reads and parses a JSON array of records from a file.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<SnapshotRecord>, ChartError> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path).map_err(|error| ChartError::Io {
        path: path.to_path_buf(),
        message: error.to_string(),
    })?;
    let records = records_from_json(&data)?;
    info!("loaded {} snapshot records from {:?}", records.len(), path);
    Ok(records)
}
