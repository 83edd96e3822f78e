use chrono::Utc;
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::models::{RecordStats, TransformedRecord, RECORD_SOURCE};

/// Uppercase the name and truncate the age to an integer.
///
/// Missing `name` becomes `""` and missing `age` becomes `0`; values of the
/// wrong type are rejected instead of being coerced.
pub fn transform(body: &Map<String, Value>) -> Result<TransformedRecord, AppError> {
    let name = match body.get("name") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.to_uppercase(),
        Some(_) => return Err(AppError::BadRequest("name must be a string".into())),
    };

    let age = match body.get("age") {
        None | Some(Value::Null) => 0,
        Some(v) => parse_age(v)
            .ok_or_else(|| AppError::BadRequest("age must be a number".into()))?,
    };

    Ok(TransformedRecord {
        name,
        age,
        processed_at: Utc::now(),
        source: RECORD_SOURCE.into(),
    })
}

fn parse_age(value: &Value) -> Option<i64> {
    let n = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => return Some(i),
            None => n.as_f64()?,
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => return Some(i),
                Err(_) => s.parse::<f64>().ok()?,
            }
        }
        _ => return None,
    };

    // Truncate toward zero; reject NaN, infinities and out-of-range floats.
    let truncated = n.trunc();
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

/// Count, mean, min and max of ages. Only the count is reported when there
/// are no records.
pub fn summarize(records: &[TransformedRecord]) -> RecordStats {
    let total_records = records.len();
    if total_records == 0 {
        return RecordStats::Empty {
            total_records,
            message: "No data processed yet".into(),
        };
    }

    let ages = records.iter().map(|r| r.age);
    let min_age = ages.clone().min().unwrap_or_default();
    let max_age = ages.clone().max().unwrap_or_default();
    let sum: f64 = ages.map(|a| a as f64).sum();

    RecordStats::Summary {
        total_records,
        avg_age: sum / total_records as f64,
        min_age,
        max_age,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(v: Value) -> Result<TransformedRecord, AppError> {
        transform(v.as_object().unwrap())
    }

    fn record(age: i64) -> TransformedRecord {
        TransformedRecord {
            name: "X".into(),
            age,
            processed_at: Utc::now(),
            source: RECORD_SOURCE.into(),
        }
    }

    #[test]
    fn test_uppercases_name_and_casts_string_age() {
        let r = run(json!({"name": "kamil", "age": "25"})).unwrap();
        assert_eq!(r.name, "KAMIL");
        assert_eq!(r.age, 25);
        assert_eq!(r.source, "api");
    }

    #[test]
    fn test_float_age_is_truncated() {
        assert_eq!(run(json!({"name": "a", "age": 31.9})).unwrap().age, 31);
        assert_eq!(run(json!({"name": "a", "age": "-2.7"})).unwrap().age, -2);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let r = run(json!({"age": 40})).unwrap();
        assert_eq!(r.name, "");
        assert_eq!(r.age, 40);

        let r = run(json!({"name": "ola"})).unwrap();
        assert_eq!(r.name, "OLA");
        assert_eq!(r.age, 0);
    }

    #[test]
    fn test_non_numeric_age_is_a_client_error() {
        assert!(matches!(run(json!({"name": "a", "age": "old"})), Err(AppError::BadRequest(_))));
        assert!(matches!(run(json!({"name": "a", "age": [1]})), Err(AppError::BadRequest(_))));
        assert!(matches!(run(json!({"name": 7})), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(
            summarize(&[]),
            RecordStats::Empty {
                total_records: 0,
                message: "No data processed yet".into(),
            }
        );
    }

    #[test]
    fn test_summarize_ages() {
        let records: Vec<_> = [25, 30, 41].into_iter().map(record).collect();
        assert_eq!(
            summarize(&records),
            RecordStats::Summary {
                total_records: 3,
                avg_age: 32.0,
                min_age: 25,
                max_age: 41,
            }
        );
    }
}
