use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::models::{AlertDirection, NewAlert, PriceAlert};

/// Database row for price_alerts table.
#[derive(Debug, Clone, FromRow)]
struct AlertRow {
    id: i64,
    coin: String,
    target_price: Decimal,
    direction: String,
    triggered: bool,
    created_at: DateTime<Utc>,
}

impl From<AlertRow> for PriceAlert {
    fn from(row: AlertRow) -> Self {
        // The CHECK constraint keeps direction to above/below.
        let direction = AlertDirection::from_api_str(&row.direction).unwrap_or_default();
        PriceAlert {
            id: row.id,
            coin: row.coin,
            target_price: row.target_price,
            direction,
            created_at: row.created_at,
            triggered: row.triggered,
        }
    }
}

pub async fn insert_alert(pool: &PgPool, alert: &NewAlert) -> anyhow::Result<PriceAlert> {
    let row = sqlx::query_as::<_, AlertRow>(
        r#"
        INSERT INTO price_alerts (coin, target_price, direction)
        VALUES ($1, $2, $3)
        RETURNING id, coin, target_price, direction, triggered, created_at
        "#,
    )
    .bind(&alert.coin)
    .bind(alert.target_price)
    .bind(alert.direction.as_str())
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

/// All alerts in creation order.
pub async fn get_alerts(pool: &PgPool) -> anyhow::Result<Vec<PriceAlert>> {
    let rows = sqlx::query_as::<_, AlertRow>(
        "SELECT id, coin, target_price, direction, triggered, created_at FROM price_alerts ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(PriceAlert::from).collect())
}
