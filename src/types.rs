//! Common types used throughout campaign-pager
//!
//! This module contains the record model shared by the decoder, the
//! pagination core and the renderers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Deref;
use std::sync::Arc;

// ============================================================================
// Record
// ============================================================================

/// Column headers of the project table, in display order
pub const COLUMN_HEADERS: [&str; 3] = ["S.No.", "Percentage Funded", "Amount Pledged"];

/// One crowdfunding campaign entry
///
/// Only the three display fields are named; every other key of the source
/// object is preserved untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Sequence index (`s.no`)
    #[serde(rename = "s.no", default)]
    pub serial_no: Value,

    /// Funding percentage (`percentage.funded`)
    #[serde(rename = "percentage.funded", default)]
    pub percentage_funded: Value,

    /// Pledged amount (`amt.pledged`)
    #[serde(rename = "amt.pledged", default)]
    pub amount_pledged: Value,

    /// Remaining fields of the campaign object
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Create a record from its three display fields
    pub fn new(
        serial_no: impl Into<Value>,
        percentage_funded: impl Into<Value>,
        amount_pledged: impl Into<Value>,
    ) -> Self {
        Self {
            serial_no: serial_no.into(),
            percentage_funded: percentage_funded.into(),
            amount_pledged: amount_pledged.into(),
            extra: Map::new(),
        }
    }

    /// Display cells in `COLUMN_HEADERS` order
    pub fn cells(&self) -> [String; 3] {
        [
            format_cell(&self.serial_no),
            format_cell(&self.percentage_funded),
            format_cell(&self.amount_pledged),
        ]
    }
}

/// Format a JSON value for a table cell
///
/// Strings are printed without quotes and `null` as an empty cell.
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Dataset
// ============================================================================

/// Ordered, immutable sequence of records
///
/// Cloning a dataset is cheap; all clones share the same records.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Arc<[Record]>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
        }
    }

    /// Borrow the records as a slice
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self {
            records: Arc::from(records),
        }
    }
}

impl Deref for Dataset {
    type Target = [Record];

    fn deref(&self) -> &[Record] {
        &self.records
    }
}

// ============================================================================
// Backoff
// ============================================================================

/// Backoff strategy for retried requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_record_deserialize_dotted_keys() {
        let record: Record = serde_json::from_value(json!({
            "s.no": 0,
            "percentage.funded": 186,
            "amt.pledged": 15823,
            "title": "Widget",
            "backers": 219
        }))
        .unwrap();

        assert_eq!(record.serial_no, json!(0));
        assert_eq!(record.percentage_funded, json!(186));
        assert_eq!(record.amount_pledged, json!(15823));
        assert_eq!(record.extra.get("title"), Some(&json!("Widget")));
        assert_eq!(record.extra.len(), 2);
    }

    #[test]
    fn test_record_missing_fields_default_to_null() {
        let record: Record = serde_json::from_value(json!({ "s.no": 3 })).unwrap();
        assert_eq!(record.percentage_funded, Value::Null);
        assert_eq!(record.cells(), ["3".to_string(), String::new(), String::new()]);
    }

    #[test]
    fn test_record_serialize_keeps_original_keys() {
        let mut record = Record::new(1, 120, 10500);
        record.extra.insert("currency".into(), json!("usd"));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "s.no": 1,
                "percentage.funded": 120,
                "amt.pledged": 10500,
                "currency": "usd"
            })
        );
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(&json!(15823)), "15823");
        assert_eq!(format_cell(&json!(12.5)), "12.5");
        assert_eq!(format_cell(&json!("abc")), "abc");
        assert_eq!(format_cell(&Value::Null), "");
        assert_eq!(format_cell(&json!(true)), "true");
    }

    #[test]
    fn test_dataset_shares_records() {
        let dataset = Dataset::from(vec![Record::new(0, 1, 2), Record::new(1, 3, 4)]);
        let clone = dataset.clone();

        assert_eq!(dataset.len(), 2);
        assert_eq!(clone[1].serial_no, json!(1));
        assert!(Dataset::empty().is_empty());
        assert_eq!(Dataset::default(), Dataset::empty());
    }

    #[test]
    fn test_backoff_type_serde() {
        let backoff: BackoffType = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(backoff, BackoffType::Linear);
        assert_eq!(BackoffType::default(), BackoffType::Exponential);
    }
}
