//! Schema check: generic JSON value → strongly-typed [`Record`].
//!
//! The parsed payload is never trusted to have the right shape. Each mode's
//! fields are checked explicitly before the typed record is built:
//!
//! * text fields must be present, non-null strings with at least one character;
//! * list fields must be present arrays whose entries are strings. An empty
//!   array passes. The prompt asks for three or more items, but that is not
//!   enforced here.
//!
//! Keys outside the schema are ignored and do not reach the record.

use crate::error::PayloadError;
use crate::record::{DiagnosisRecord, Mode, Record, SkincarePlanRecord};
use serde_json::{Map, Value};

/// Validate `value` against the schema for `mode`.
pub fn validate(value: &Value, mode: Mode) -> Result<Record, PayloadError> {
    let obj = value.as_object().ok_or(PayloadError::NotAnObject)?;
    match mode {
        Mode::Diagnosis => Ok(Record::Diagnosis(DiagnosisRecord {
            diagnosis: required_text(obj, "diagnosis")?,
            cause: required_text(obj, "cause")?,
            treatment: required_list(obj, "treatment")?,
            prevention: required_list(obj, "prevention")?,
            medicines: required_list(obj, "medicines")?,
            natural_remedies: required_list(obj, "naturalRemedies")?,
            products: required_list(obj, "products")?,
        })),
        Mode::SkincarePlan => Ok(Record::SkincarePlan(SkincarePlanRecord {
            skin_analysis: required_text(obj, "skinAnalysis")?,
            morning_routine: required_list(obj, "morningRoutine")?,
            evening_routine: required_list(obj, "eveningRoutine")?,
            product_recommendations: required_list(obj, "productRecommendations")?,
            diet_tips: required_list(obj, "dietTips")?,
            lifestyle_tips: required_list(obj, "lifestyleTips")?,
        })),
    }
}

fn required<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, PayloadError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(PayloadError::MissingField(field)),
        Some(v) => Ok(v),
    }
}

fn required_text(obj: &Map<String, Value>, field: &'static str) -> Result<String, PayloadError> {
    match required(obj, field)? {
        Value::String(s) if s.is_empty() => Err(PayloadError::EmptyField(field)),
        Value::String(s) => Ok(s.clone()),
        _ => Err(PayloadError::WrongType {
            field,
            expected: "a string",
        }),
    }
}

fn required_list(obj: &Map<String, Value>, field: &'static str) -> Result<Vec<String>, PayloadError> {
    let wrong_type = PayloadError::WrongType {
        field,
        expected: "an array of strings",
    };
    let items = required(obj, field)?.as_array().ok_or_else(|| wrong_type.clone())?;
    items
        .iter()
        .map(|item| item.as_str().map(str::to_owned).ok_or_else(|| wrong_type.clone()))
        .collect()
}
