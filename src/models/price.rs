//! Price data models shared between the fetcher, chart rendering and CLI output

use serde::{Deserialize, Serialize};

/// A single point in a token's price history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Price in USD
    pub price: f64,
}

/// Aggregated price information for a (symbol, timeframe) pair.
///
/// This is both the unit of cache storage and the value returned to callers.
/// `error` is always `None` on returned values: the fetcher degrades to
/// synthetic data instead of surfacing failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceInfo {
    pub current_price: f64,
    pub price_change_24h: f64,
    pub price_data: Vec<PriceSample>,
    pub is_loading: bool,
    pub error: Option<String>,
}
