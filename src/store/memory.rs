use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use super::{AlertStore, PortfolioStore, StoreError};
use crate::models::{Holding, NewAlert, PriceAlert, TransformedRecord, MAX_AMOUNT};

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

/// In-process ledger. The mutex serialises read-modify-write on a holding so
/// concurrent adds to the same coin are never lost.
#[derive(Clone, Default)]
pub struct MemoryPortfolioStore {
    inner: Arc<Mutex<Vec<Holding>>>,
}

impl MemoryPortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PortfolioStore for MemoryPortfolioStore {
    async fn add(
        &self,
        coin: &str,
        amount: Decimal,
        buy_price: Option<Decimal>,
    ) -> Result<Holding, StoreError> {
        let mut holdings = self.inner.lock().await;

        if let Some(existing) = holdings.iter_mut().find(|h| h.coin == coin) {
            existing.amount = existing
                .amount
                .checked_add(amount)
                .filter(|total| *total < MAX_AMOUNT)
                .ok_or_else(|| StoreError::AmountOverflow(coin.to_string()))?;
            if existing.buy_price.is_none() {
                existing.buy_price = buy_price;
            }
            return Ok(existing.clone());
        }

        let holding = Holding {
            coin: coin.to_string(),
            amount,
            buy_price,
            created_at: Utc::now(),
        };
        holdings.push(holding.clone());
        Ok(holding)
    }

    async fn list(&self) -> anyhow::Result<Vec<Holding>> {
        Ok(self.inner.lock().await.clone())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct MemoryAlertStore {
    inner: Arc<Mutex<Vec<PriceAlert>>>,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertStore for MemoryAlertStore {
    async fn create(&self, alert: NewAlert) -> anyhow::Result<PriceAlert> {
        let mut alerts = self.inner.lock().await;
        // Append-only, so the next id is always len + 1.
        let alert = PriceAlert {
            id: alerts.len() as i64 + 1,
            coin: alert.coin,
            target_price: alert.target_price,
            direction: alert.direction,
            created_at: Utc::now(),
            triggered: false,
        };
        alerts.push(alert.clone());
        Ok(alert)
    }

    async fn list(&self) -> anyhow::Result<Vec<PriceAlert>> {
        Ok(self.inner.lock().await.clone())
    }
}

// ---------------------------------------------------------------------------
// Transformed records
// ---------------------------------------------------------------------------

/// Append-only log of transformed records. Always in-process.
#[derive(Clone, Default)]
pub struct RecordLog {
    inner: Arc<Mutex<Vec<TransformedRecord>>>,
}

impl RecordLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, record: TransformedRecord) {
        self.inner.lock().await.push(record);
    }

    pub async fn snapshot(&self) -> Vec<TransformedRecord> {
        self.inner.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertDirection;

    #[tokio::test]
    async fn test_add_same_coin_sums_amounts() {
        let store = MemoryPortfolioStore::new();
        store.add("bitcoin", Decimal::new(5, 1), Some(Decimal::from(60_000))).await.unwrap();
        let holding = store
            .add("bitcoin", Decimal::new(25, 2), Some(Decimal::from(70_000)))
            .await
            .unwrap();

        assert_eq!(holding.amount, Decimal::new(75, 2)); // 0.5 + 0.25
        assert_eq!(holding.buy_price, Some(Decimal::from(60_000)));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_sum_beyond_max_amount() {
        let store = MemoryPortfolioStore::new();
        let big = Decimal::from(900_000_000_000_000_000i64);
        store.add("bitcoin", big, None).await.unwrap();

        let err = store.add("bitcoin", big, None).await.unwrap_err();
        assert!(matches!(err, StoreError::AmountOverflow(coin) if coin == "bitcoin"));
        assert_eq!(store.list().await.unwrap()[0].amount, big);
    }

    #[tokio::test]
    async fn test_holdings_keep_insertion_order() {
        let store = MemoryPortfolioStore::new();
        store.add("solana", Decimal::ONE, None).await.unwrap();
        store.add("bitcoin", Decimal::ONE, None).await.unwrap();
        store.add("solana", Decimal::ONE, None).await.unwrap();

        let coins: Vec<String> = store.list().await.unwrap().into_iter().map(|h| h.coin).collect();
        assert_eq!(coins, vec!["solana", "bitcoin"]);
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_not_lost() {
        let store = MemoryPortfolioStore::new();
        let mut tasks = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.add("ethereum", Decimal::ONE, None).await.unwrap();
            }));
        }
        for t in tasks {
            t.await.unwrap();
        }

        let holdings = store.list().await.unwrap();
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].amount, Decimal::from(50));
    }

    #[tokio::test]
    async fn test_alert_ids_are_sequential() {
        let store = MemoryAlertStore::new();
        for coin in ["bitcoin", "ethereum", "solana"] {
            store
                .create(NewAlert {
                    coin: coin.into(),
                    target_price: Decimal::from(100),
                    direction: AlertDirection::Below,
                })
                .await
                .unwrap();
        }

        let alerts = store.list().await.unwrap();
        let ids: Vec<i64> = alerts.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(alerts.iter().all(|a| !a.triggered));
        assert_eq!(alerts[2].coin, "solana");
    }
}
