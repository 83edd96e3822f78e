//! Storage seams for holdings and alerts.
//!
//! Handlers only see the traits; the backend is picked once at startup from
//! `DATABASE_URL` (Postgres) or falls back to in-process storage.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Holding, NewAlert, PriceAlert};

pub use memory::{MemoryAlertStore, MemoryPortfolioStore, RecordLog};
pub use postgres::{PgAlertStore, PgPortfolioStore};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The summed amount would leave the storable range.
    #[error("holding for '{0}' would exceed the maximum amount")]
    AmountOverflow(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Sum `amount` into the holding for `coin`. Callers validate inputs.
    async fn add(
        &self,
        coin: &str,
        amount: Decimal,
        buy_price: Option<Decimal>,
    ) -> Result<Holding, StoreError>;

    /// All holdings in insertion order.
    async fn list(&self) -> anyhow::Result<Vec<Holding>>;

    fn backend(&self) -> &'static str;
}

#[async_trait]
pub trait AlertStore: Send + Sync {
    async fn create(&self, alert: NewAlert) -> anyhow::Result<PriceAlert>;

    /// All alerts in creation order.
    async fn list(&self) -> anyhow::Result<Vec<PriceAlert>>;
}
