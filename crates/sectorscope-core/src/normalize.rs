//! Record normalizer: raw dataset values into typed entries.
//!
//! A malformed record never aborts the run. It is collected as a
//! [`RejectedRecord`] and the remaining records are normalized as usual. Only a
//! dataset whose top level is not an array is fatal.

use log::warn;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{
    CompanyName, NormalizedEntry, PipelineError, RawRecord, TradeDate, ValidationError,
};

/// A dataset record that failed validation, kept for data-quality audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRecord {
    /// Zero-based position in the input sequence.
    pub index: usize,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: ValidationError,
}

/// Output of the normalizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub entries: Vec<NormalizedEntry>,
    pub rejected: Vec<RejectedRecord>,
}

impl Normalized {
    pub fn total(&self) -> usize {
        self.entries.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, index: usize, result: Result<NormalizedEntry, ValidationError>) {
        match result {
            Ok(entry) => self.entries.push(entry),
            Err(reason) => {
                warn!("rejected record #{index}: {reason}");
                self.rejected.push(RejectedRecord { index, reason });
            }
        }
    }
}

/// Normalize an untyped dataset as decoded from JSON.
pub fn normalize_value(dataset: &Value) -> Result<Normalized, PipelineError> {
    let records = dataset
        .as_array()
        .ok_or(PipelineError::StructurallyInvalid {
            found: json_kind(dataset),
        })?;

    let mut normalized = Normalized::default();
    for (index, record) in records.iter().enumerate() {
        normalized.push(index, entry_from_value(record));
    }

    Ok(normalized)
}

/// Normalize records that were already decoded into their wire shape.
pub fn normalize_records(records: &[RawRecord]) -> Normalized {
    let mut normalized = Normalized::default();
    for (index, record) in records.iter().enumerate() {
        normalized.push(index, NormalizedEntry::try_from(record));
    }

    normalized
}

fn entry_from_value(record: &Value) -> Result<NormalizedEntry, ValidationError> {
    let object = record.as_object().ok_or(ValidationError::RecordNotObject)?;

    let name = require_str(object, "name")?;
    let date = require_str(object, "date")?;
    let close_price = require_number(object, "close_price")?;
    let market_cap = optional_number(object, "market_cap")?;

    NormalizedEntry::new(
        CompanyName::parse(name)?,
        TradeDate::parse(date)?,
        close_price,
        market_cap,
    )
}

fn require_str<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField { field }),
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(_) => Err(ValidationError::WrongFieldType {
            field,
            expected: "string",
        }),
    }
}

fn require_number(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<f64, ValidationError> {
    optional_number(object, field)?.ok_or(ValidationError::MissingField { field })
}

// Numeric strings are coerced; anything else that is not a JSON number is rejected.
fn optional_number(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<f64>, ValidationError> {
    let wrong_type = ValidationError::WrongFieldType {
        field,
        expected: "number",
    };

    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number.as_f64().map(Some).ok_or(wrong_type),
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| wrong_type),
        Some(_) => Err(wrong_type),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn serialize_reason<S>(reason: &ValidationError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(reason)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn normalizes_well_formed_records() {
        let dataset = json!([
            {"name": "A", "date": "2024-01-01", "close_price": 100, "market_cap": 500},
            {"name": "B", "date": "2024-01-01", "close_price": 50.5}
        ]);

        let normalized = normalize_value(&dataset).expect("array input");
        assert_eq!(normalized.entries.len(), 2);
        assert!(normalized.rejected.is_empty());
        assert_eq!(normalized.entries[1].market_cap, None);
    }

    #[test]
    fn empty_array_is_not_an_error() {
        let normalized = normalize_value(&json!([])).expect("empty array is valid");
        assert!(normalized.is_empty());
        assert_eq!(normalized.total(), 0);
    }

    #[test]
    fn non_array_dataset_is_fatal() {
        let err = normalize_value(&json!({"name": "A"})).expect_err("must fail");
        assert!(matches!(
            err,
            PipelineError::StructurallyInvalid { found: "object" }
        ));
    }

    #[test]
    fn collects_malformed_records_and_keeps_the_rest() {
        let dataset = json!([
            {"name": "A", "date": "not-a-date", "close_price": 1},
            {"name": "A", "date": "2024-01-02", "close_price": "abc"},
            "garbage",
            {"date": "2024-01-02", "close_price": 1},
            {"name": "A", "date": "2024-01-03", "close_price": 2}
        ]);

        let normalized = normalize_value(&dataset).expect("array input");
        assert_eq!(normalized.entries.len(), 1);

        let reasons: Vec<_> = normalized
            .rejected
            .iter()
            .map(|r| (r.index, r.reason.clone()))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (
                    0,
                    ValidationError::InvalidDate {
                        value: String::from("not-a-date")
                    }
                ),
                (
                    1,
                    ValidationError::WrongFieldType {
                        field: "close_price",
                        expected: "number"
                    }
                ),
                (2, ValidationError::RecordNotObject),
                (3, ValidationError::MissingField { field: "name" }),
            ]
        );
    }

    #[test]
    fn coerces_numeric_strings() {
        let dataset = json!([
            {"name": "A", "date": "2024-01-01", "close_price": " 12.5 ", "market_cap": "1e9"}
        ]);

        let normalized = normalize_value(&dataset).expect("array input");
        assert_eq!(normalized.entries[0].close_price, 12.5);
        assert_eq!(normalized.entries[0].market_cap, Some(1e9));
    }

    #[test]
    fn typed_records_share_validation() {
        let records = vec![
            RawRecord::new("A", "2024-01-01", 1.0, None),
            RawRecord::new("", "2024-01-01", 1.0, None),
        ];

        let normalized = normalize_records(&records);
        assert_eq!(normalized.entries.len(), 1);
        assert_eq!(normalized.rejected[0].index, 1);
        assert_eq!(
            normalized.rejected[0].reason,
            ValidationError::EmptyCompanyName
        );
    }

    #[test]
    fn rejected_record_serializes_reason_as_message() {
        let rejected = RejectedRecord {
            index: 3,
            reason: ValidationError::RecordNotObject,
        };

        let value = serde_json::to_value(rejected).expect("serializable");
        assert_eq!(
            value,
            json!({"index": 3, "reason": "record must be a JSON object"})
        );
    }
}
