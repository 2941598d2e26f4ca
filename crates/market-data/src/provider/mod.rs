//! Remote API access: envelope classification, the `MarketDataApi` trait
//! and the Alpha Vantage client.

pub mod alpha_vantage;
mod envelope;
mod traits;

pub use envelope::{classify, ApiBody};
pub use traits::MarketDataApi;
