use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::models::{AlertDirection, NewAlert, PriceAlert};
use crate::services::validation::{required_coin, required_positive_decimal};
use crate::store::AlertStore;

const REQUIRED_FIELDS_MSG: &str = "Required: coin, target_price, direction (above/below)";

pub fn parse_new_alert(body: &Map<String, Value>) -> Result<NewAlert, AppError> {
    if !body.contains_key("coin") || !body.contains_key("target_price") {
        return Err(AppError::BadRequest(REQUIRED_FIELDS_MSG.into()));
    }

    let direction = match body.get("direction") {
        None | Some(Value::Null) => AlertDirection::default(),
        Some(Value::String(s)) => AlertDirection::from_api_str(s).ok_or_else(|| {
            AppError::BadRequest("direction must be 'above' or 'below'".into())
        })?,
        Some(_) => {
            return Err(AppError::BadRequest(
                "direction must be 'above' or 'below'".into(),
            ))
        }
    };

    Ok(NewAlert {
        coin: required_coin(body)?,
        target_price: required_positive_decimal(body, "target_price")?,
        direction,
    })
}

pub async fn create_alert(store: &dyn AlertStore, alert: NewAlert) -> Result<PriceAlert, AppError> {
    let alert = store.create(alert).await?;
    tracing::info!(
        id = alert.id,
        coin = %alert.coin,
        target = %alert.target_price,
        direction = %alert.direction,
        "Price alert registered"
    );
    Ok(alert)
}
