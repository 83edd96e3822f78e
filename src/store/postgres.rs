use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{AlertStore, PortfolioStore, StoreError};
use crate::db::{alert_repo, portfolio_repo};
use crate::models::{Holding, NewAlert, PriceAlert};

/// SQLSTATE raised when the summed amount no longer fits `NUMERIC(28,10)`.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Holdings in `portfolio_holdings`; each add is a single upsert statement.
#[derive(Clone)]
pub struct PgPortfolioStore {
    pool: PgPool,
}

impl PgPortfolioStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortfolioStore for PgPortfolioStore {
    async fn add(
        &self,
        coin: &str,
        amount: Decimal,
        buy_price: Option<Decimal>,
    ) -> Result<Holding, StoreError> {
        portfolio_repo::upsert_holding(&self.pool, coin, amount, buy_price)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) => {
                    StoreError::AmountOverflow(coin.to_string())
                }
                other => StoreError::Backend(other.into()),
            })
    }

    async fn list(&self) -> anyhow::Result<Vec<Holding>> {
        portfolio_repo::get_holdings(&self.pool).await
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[derive(Clone)]
pub struct PgAlertStore {
    pool: PgPool,
}

impl PgAlertStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlertStore for PgAlertStore {
    async fn create(&self, alert: NewAlert) -> anyhow::Result<PriceAlert> {
        alert_repo::insert_alert(&self.pool, &alert).await
    }

    async fn list(&self) -> anyhow::Result<Vec<PriceAlert>> {
        alert_repo::get_alerts(&self.pool).await
    }
}
