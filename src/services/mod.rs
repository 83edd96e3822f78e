pub mod alerts;
pub mod portfolio;
pub mod prices;
pub mod transform;
pub mod validation;

pub use prices::{PriceError, PriceService};
