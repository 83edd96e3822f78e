use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ---------------------------------------------------------------------------
// /simple/price
// ---------------------------------------------------------------------------

/// One coin's entry in a `/simple/price` response.
///
/// CoinGecko only includes the keys that were requested, and occasionally
/// sends `null` or a string where a number is expected; every field is
/// therefore optional and anything unparseable becomes `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimplePrice {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub usd: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub eur: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub pln: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub usd_24h_change: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub usd_market_cap: Option<Decimal>,
}

/// `/simple/price` response body, keyed by CoinGecko coin id.
pub type SimplePriceResponse = HashMap<String, SimplePrice>;

// ---------------------------------------------------------------------------
// /coins/markets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct MarketCoin {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub market_cap_rank: Option<u32>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub current_price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price_change_percentage_24h: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub market_cap: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Lenient field parsing
// ---------------------------------------------------------------------------

/// Parse a JSON number or numeric string into a `Decimal`.
///
/// Handles the scientific notation serde_json emits for very small or very
/// large floats (`1e-7`).
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };

    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_simple_price_maps_malformed_fields_to_none() {
        let body = r#"{
            "bitcoin": {"usd": 67000.5, "eur": "abc", "usd_24h_change": null, "usd_market_cap": 1.3e12}
        }"#;
        let parsed: SimplePriceResponse = serde_json::from_str(body).unwrap();
        let btc = &parsed["bitcoin"];

        assert_eq!(btc.usd, Some(Decimal::new(670005, 1)));
        assert_eq!(btc.eur, None);
        assert_eq!(btc.pln, None);
        assert_eq!(btc.usd_24h_change, None);
        assert_eq!(btc.usd_market_cap, Some(Decimal::from(1_300_000_000_000i64)));
    }

    #[test]
    fn test_decimal_from_value_handles_scientific_notation() {
        let v: Value = serde_json::from_str("1e-7").unwrap();
        assert_eq!(decimal_from_value(&v), Some(Decimal::new(1, 7)));

        let v = Value::String("25".into());
        assert_eq!(decimal_from_value(&v), Some(Decimal::from(25)));

        assert_eq!(decimal_from_value(&Value::Bool(true)), None);
    }

    #[test]
    fn test_market_coin_tolerates_missing_fields() {
        let body = r#"[{"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "market_cap_rank": 1}]"#;
        let coins: Vec<MarketCoin> = serde_json::from_str(body).unwrap();

        assert_eq!(coins[0].market_cap_rank, Some(1));
        assert_eq!(coins[0].current_price, None);
        assert_eq!(coins[0].price_change_percentage_24h, None);
    }
}
