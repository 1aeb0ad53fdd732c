use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-coin quote from the simple-price endpoint.
///
/// Both fields are optional upstream; callers default missing values to 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimplePriceQuote {
    pub usd: Option<f64>,
    pub usd_24h_change: Option<f64>,
}

/// Response from GET /simple/price, keyed by coin identifier
pub type SimplePriceResponse = HashMap<String, SimplePriceQuote>;

/// Response from GET /coins/{id}/market_chart.
///
/// Each series is a list of `[timestamp-millis, value]` pairs ordered by
/// timestamp ascending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<(i64, f64)>,
    #[serde(default)]
    pub market_caps: Vec<(i64, f64)>,
    #[serde(default)]
    pub total_volumes: Vec<(i64, f64)>,
}

/// Errors from the CoinGecko client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Rate limited: {0}")]
    RateLimited(String),
    #[error("Server error ({0}): {1}")]
    ServerError(u16, String),
    #[error("HTTP error ({0}): {1}")]
    HttpError(u16, String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_price_response_parses_upstream_shape() {
        let json = r#"{"celo": {"usd": 0.54, "usd_24h_change": -2.5}}"#;
        let parsed: SimplePriceResponse = serde_json::from_str(json).unwrap();

        let quote = parsed.get("celo").unwrap();
        assert_eq!(quote.usd, Some(0.54));
        assert_eq!(quote.usd_24h_change, Some(-2.5));
    }

    #[test]
    fn test_simple_price_tolerates_missing_change_field() {
        let json = r#"{"celo": {"usd": 0.54}}"#;
        let parsed: SimplePriceResponse = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.get("celo").unwrap().usd_24h_change, None);
    }

    #[test]
    fn test_market_chart_parses_timestamp_price_pairs() {
        let json = r#"{
            "prices": [[1700000000000, 0.5], [1700003600000, 0.52]],
            "market_caps": [],
            "total_volumes": []
        }"#;
        let parsed: MarketChartResponse = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.prices.len(), 2);
        assert_eq!(parsed.prices[0], (1_700_000_000_000, 0.5));
    }

    #[test]
    fn test_market_chart_defaults_missing_series() {
        let parsed: MarketChartResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.prices.is_empty());
    }
}
