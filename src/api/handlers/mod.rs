pub mod alerts;
pub mod crypto;
pub mod health;
pub mod info;
pub mod metrics;
pub mod portfolio;
pub mod transform;
