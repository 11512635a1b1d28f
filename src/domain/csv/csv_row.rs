// ============================================================
// CSV ROW TYPES
// ============================================================
// Cells, records and rows handed to the CSV formatter

use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

use crate::domain::error::{AppError, Result};

/// A single scalar value destined for one CSV cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Bool(true) => f.write_str("1"),
            Cell::Bool(false) => Ok(()),
            Cell::Int(value) => write!(f, "{}", value),
            Cell::Float(value) => write!(f, "{}", value),
            Cell::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Int(value as i64)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Int(value as i64)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Null)
    }
}

impl TryFrom<Value> for Cell {
    type Error = AppError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Cell::Null),
            Value::Bool(b) => Ok(Cell::Bool(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Cell::Int(i))
                } else if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
                    Ok(Cell::Float(f))
                } else {
                    // u64 above i64::MAX
                    Ok(Cell::Text(n.to_string()))
                }
            }
            Value::String(s) => Ok(Cell::Text(s)),
            other => Err(AppError::SerializationError(format!(
                "CSV cells must be scalar values, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// The underlying data of one row. Keyed records carry header labels,
/// indexed records only carry values.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Keyed(Vec<(String, Cell)>),
    Indexed(Vec<Cell>),
}

impl Record {
    /// Build a keyed record, keeping insertion order
    pub fn keyed<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Cell>,
    {
        Record::Keyed(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build an indexed record
    pub fn indexed<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Cell>,
    {
        Record::Indexed(values.into_iter().map(Into::into).collect())
    }

    pub fn is_keyed(&self) -> bool {
        matches!(self, Record::Keyed(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Record::Keyed(entries) => entries.len(),
            Record::Indexed(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Header labels, only available for keyed records
    pub fn keys(&self) -> Option<Vec<&str>> {
        match self {
            Record::Keyed(entries) => Some(entries.iter().map(|(k, _)| k.as_str()).collect()),
            Record::Indexed(_) => None,
        }
    }

    /// Cell values rendered as text, keys dropped
    pub fn values(&self) -> Vec<String> {
        match self {
            Record::Keyed(entries) => entries.iter().map(|(_, v)| v.to_string()).collect(),
            Record::Indexed(values) => values.iter().map(ToString::to_string).collect(),
        }
    }
}

impl TryFrom<Value> for Record {
    type Error = AppError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Record::Keyed(
                map.into_iter()
                    .map(|(k, v)| Cell::try_from(v).map(|cell| (k, cell)))
                    .collect::<Result<Vec<_>>>()?,
            )),
            Value::Array(items) => Ok(Record::Indexed(
                items
                    .into_iter()
                    .map(Cell::try_from)
                    .collect::<Result<Vec<_>>>()?,
            )),
            other => Err(AppError::SerializationError(format!(
                "CSV rows must be objects or arrays, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Anything that can produce the record for one CSV row
pub trait CsvSerialize: Send + Sync {
    fn csv_record(&self) -> Result<Record>;
}

impl CsvSerialize for Record {
    fn csv_record(&self) -> Result<Record> {
        Ok(self.clone())
    }
}

/// A single row of a dataset
pub enum Row {
    Record(Record),
    Object(Box<dyn CsvSerialize>),
}

impl Row {
    /// Wrap a value exposing its own row serialization
    pub fn object<T: CsvSerialize + 'static>(value: T) -> Self {
        Row::Object(Box::new(value))
    }

    /// Convert any serde-serializable value. Structs and maps become keyed
    /// records in field order, sequences become indexed records.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let json = serde_json::to_value(value)?;
        Ok(Row::Record(Record::try_from(json)?))
    }

    /// Record backing this row; objects are asked to serialize themselves
    pub fn row_data(&self) -> Result<Cow<'_, Record>> {
        match self {
            Row::Record(record) => Ok(Cow::Borrowed(record)),
            Row::Object(object) => object.csv_record().map(Cow::Owned),
        }
    }
}

impl From<Record> for Row {
    fn from(record: Record) -> Self {
        Row::Record(record)
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Row::Record(record) => f.debug_tuple("Record").field(record).finish(),
            Row::Object(_) => f.write_str("Object(..)"),
        }
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
