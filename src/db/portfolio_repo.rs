use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::Holding;

/// Add `amount` to the holding for `coin`, creating it if needed.
/// The first recorded buy price is kept.
pub async fn upsert_holding(
    pool: &PgPool,
    coin: &str,
    amount: Decimal,
    buy_price: Option<Decimal>,
) -> Result<Holding, sqlx::Error> {
    sqlx::query_as::<_, Holding>(
        r#"
        INSERT INTO portfolio_holdings (coin, amount, buy_price)
        VALUES ($1, $2, $3)
        ON CONFLICT (coin) DO UPDATE
            SET amount = portfolio_holdings.amount + EXCLUDED.amount,
                buy_price = COALESCE(portfolio_holdings.buy_price, EXCLUDED.buy_price),
                updated_at = NOW()
        RETURNING coin, amount, buy_price, created_at
        "#,
    )
    .bind(coin)
    .bind(amount)
    .bind(buy_price)
    .fetch_one(pool)
    .await
}

/// All holdings, oldest first.
pub async fn get_holdings(pool: &PgPool) -> anyhow::Result<Vec<Holding>> {
    let rows = sqlx::query_as::<_, Holding>(
        "SELECT coin, amount, buy_price, created_at FROM portfolio_holdings ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
