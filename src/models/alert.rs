use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertDirection {
    #[default]
    Above,
    Below,
}

impl AlertDirection {
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "above" => Some(AlertDirection::Above),
            "below" => Some(AlertDirection::Below),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertDirection::Above => "above",
            AlertDirection::Below => "below",
        }
    }
}

impl fmt::Display for AlertDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered price alert. `triggered` is stored but never evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceAlert {
    pub id: i64,
    pub coin: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub target_price: Decimal,
    pub direction: AlertDirection,
    pub created_at: DateTime<Utc>,
    pub triggered: bool,
}

/// Validated input for a new alert.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub coin: String,
    pub target_price: Decimal,
    pub direction: AlertDirection,
}
