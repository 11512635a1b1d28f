// ============================================================
// DATASET
// ============================================================
// Input accepted by the CSV response builder

use serde_json::Value;

use super::{Record, Row};
use crate::domain::error::{AppError, Result};

/// Rows to format, or an already formatted payload
#[derive(Debug)]
pub enum Dataset {
    Rows(Vec<Row>),
    Raw(String),
}

/// Emptiness check run before any formatting
pub trait IsEmpty {
    fn is_empty(&self) -> bool;
}

impl IsEmpty for Dataset {
    fn is_empty(&self) -> bool {
        match self {
            Dataset::Rows(rows) => IsEmpty::is_empty(rows.as_slice()),
            Dataset::Raw(raw) => IsEmpty::is_empty(raw.as_str()),
        }
    }
}

impl<T> IsEmpty for [T] {
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> IsEmpty for Vec<T> {
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IsEmpty for str {
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IsEmpty for String {
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Row>> for Dataset {
    fn from(rows: Vec<Row>) -> Self {
        Dataset::Rows(rows)
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Dataset::Rows(records.into_iter().map(Row::Record).collect())
    }
}

impl From<String> for Dataset {
    fn from(raw: String) -> Self {
        Dataset::Raw(raw)
    }
}

impl From<&str> for Dataset {
    fn from(raw: &str) -> Self {
        Dataset::Raw(raw.to_string())
    }
}

impl TryFrom<Value> for Dataset {
    type Error = AppError;

    /// Strings pass through as raw payloads, arrays become rows
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(raw) => Ok(Dataset::Raw(raw)),
            Value::Array(items) => Ok(Dataset::Rows(
                items
                    .into_iter()
                    .map(|item| Record::try_from(item).map(Row::Record))
                    .collect::<Result<Vec<_>>>()?,
            )),
            _ => Err(AppError::SerializationError(
                "CSV data must be an array of rows or a string".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_rows_and_strings() {
        assert!(IsEmpty::is_empty(&Dataset::Rows(Vec::new())));
        assert!(IsEmpty::is_empty(&Dataset::from("")));
        assert!(!IsEmpty::is_empty(&Dataset::from("a;b")));
        assert!(!IsEmpty::is_empty(&Dataset::from(vec![Record::indexed([1])])));
    }

    #[test]
    fn test_whitespace_string_is_not_empty() {
        assert!(!IsEmpty::is_empty(&Dataset::from(" ")));
    }

    #[test]
    fn test_dataset_from_json() {
        let data = Dataset::try_from(json!([{"a": 1}, [1, 2]])).unwrap();
        match data {
            Dataset::Rows(rows) => {
                assert_eq!(rows.len(), 2);
                assert!(matches!(rows[0], Row::Record(Record::Keyed(_))));
                assert!(matches!(rows[1], Row::Record(Record::Indexed(_))));
            }
            Dataset::Raw(_) => panic!("expected rows"),
        }

        let data = Dataset::try_from(json!("raw,already,formatted")).unwrap();
        assert!(matches!(data, Dataset::Raw(ref s) if s == "raw,already,formatted"));

        assert!(Dataset::try_from(json!(12)).is_err());
    }
}
