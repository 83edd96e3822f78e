pub mod api;
pub mod cache;
pub mod coingecko;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod services;
pub mod store;

use std::sync::Arc;

use crate::coingecko::CoinGeckoClient;
use crate::config::AppConfig;
use crate::services::PriceService;
use crate::store::{
    AlertStore, MemoryAlertStore, MemoryPortfolioStore, PgAlertStore, PgPortfolioStore,
    PortfolioStore, RecordLog,
};

#[derive(Clone)]
pub struct AppState {
    /// Present only when holdings and alerts are stored in Postgres.
    pub db: Option<sqlx::PgPool>,
    pub config: AppConfig,
    pub prices: PriceService,
    pub portfolio: Arc<dyn PortfolioStore>,
    pub alerts: Arc<dyn AlertStore>,
    pub records: RecordLog,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}

impl AppState {
    /// Wire storage, cache and the price client from configuration.
    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let client = CoinGeckoClient::new(
            config.coingecko_api_url.clone(),
            config.coingecko_api_key.clone(),
            config.upstream_timeout(),
        )?;
        let cache = cache::from_config(&config)?;
        let prices = PriceService::new(client, cache);

        let (db, portfolio, alerts) = match &config.database_url {
            Some(url) => {
                tracing::info!("Connecting to database...");
                let pool = db::init_pool(url).await?;
                tracing::info!("Database connected");
                (
                    Some(pool.clone()),
                    Arc::new(PgPortfolioStore::new(pool.clone())) as Arc<dyn PortfolioStore>,
                    Arc::new(PgAlertStore::new(pool)) as Arc<dyn AlertStore>,
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, holdings and alerts are kept in memory");
                (
                    None,
                    Arc::new(MemoryPortfolioStore::new()) as Arc<dyn PortfolioStore>,
                    Arc::new(MemoryAlertStore::new()) as Arc<dyn AlertStore>,
                )
            }
        };

        Ok(Self {
            db,
            config,
            prices,
            portfolio,
            alerts,
            records: RecordLog::new(),
            metrics_handle: crate::metrics::init_metrics(),
        })
    }

    pub fn storage_backend(&self) -> &'static str {
        self.portfolio.backend()
    }
}
