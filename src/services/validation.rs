//! Field extraction for loosely-typed JSON request bodies.
//!
//! Clients send amounts and prices as JSON numbers or numeric strings, so
//! bodies are read as `serde_json::Map` and validated field by field.

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::coingecko::types::decimal_from_value;
use crate::errors::AppError;
use crate::models::MAX_AMOUNT;

/// Parse a request body into a non-empty JSON object. Empty bodies, invalid
/// JSON, non-objects and `{}` all yield `None`.
pub fn json_object(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Some(map),
        _ => None,
    }
}

/// `coin` as a trimmed, lowercased, non-empty string.
pub fn required_coin(body: &Map<String, Value>) -> Result<String, AppError> {
    match body.get("coin") {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_lowercase()),
        _ => Err(AppError::BadRequest("coin must be a non-empty string".into())),
    }
}

/// A positive number below [`MAX_AMOUNT`], given as a JSON number or numeric string.
pub fn required_positive_decimal(
    body: &Map<String, Value>,
    field: &str,
) -> Result<Decimal, AppError> {
    let value = body
        .get(field)
        .and_then(decimal_from_value)
        .filter(|d| d.is_sign_positive() && !d.is_zero())
        .ok_or_else(|| AppError::BadRequest(format!("{field} must be a positive number")))?;

    if value >= MAX_AMOUNT {
        return Err(AppError::BadRequest(format!("{field} must be less than {MAX_AMOUNT}")));
    }
    Ok(value)
}

/// Like [`required_positive_decimal`], but absent or `null` is allowed.
pub fn optional_positive_decimal(
    body: &Map<String, Value>,
    field: &str,
) -> Result<Option<Decimal>, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => required_positive_decimal(body, field).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_object_rejects_empty_inputs() {
        assert!(json_object(b"").is_none());
        assert!(json_object(b"{}").is_none());
        assert!(json_object(b"[1, 2]").is_none());
        assert!(json_object(b"not json").is_none());
        assert!(json_object(br#"{"name": "kamil"}"#).is_some());
    }

    #[test]
    fn test_required_coin_normalises_case() {
        let body = json!({"coin": "  Ethereum "});
        assert_eq!(required_coin(body.as_object().unwrap()).unwrap(), "ethereum");

        let body = json!({"coin": 42});
        assert!(required_coin(body.as_object().unwrap()).is_err());
    }

    #[test]
    fn test_positive_decimal_rejects_values_beyond_storage_range() {
        assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000_000_000i64));

        for raw in [json!("1e25"), json!("10000000000000000000000000"), json!(1e18)] {
            let body = json!({"amount": raw});
            let err = required_positive_decimal(body.as_object().unwrap(), "amount").unwrap_err();
            assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("less than")));
        }

        let body = json!({"amount": "999999999999999999.5"});
        assert!(required_positive_decimal(body.as_object().unwrap(), "amount").is_ok());
    }

    #[test]
    fn test_optional_decimal_allows_null() {
        let body = json!({"buy_price": null});
        assert_eq!(optional_positive_decimal(body.as_object().unwrap(), "buy_price").unwrap(), None);

        let body = json!({"buy_price": "-3"});
        assert!(optional_positive_decimal(body.as_object().unwrap(), "buy_price").is_err());
    }
}
