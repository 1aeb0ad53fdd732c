use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client as HttpClient;
use tracing::warn;

use super::models::{ApiError, MarketChartResponse, SimplePriceQuote, SimplePriceResponse};
use crate::utils::ratelimit::rate_limit_coingecko_api;

/// CoinGecko API client for price and market-chart queries
pub struct CoinGeckoClient {
    http_client: HttpClient,
    api_key: Option<String>,
    base_url: String,
}

impl CoinGeckoClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.coingecko.com/api/v3";

    /// Requests that take longer than this are treated as failed rather than
    /// hanging a caller indefinitely
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a new CoinGecko client against the public API
    pub fn new(api_key: Option<String>) -> Result<Self, ApiError> {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            base_url,
        })
    }

    /// Create default headers, attaching the demo API key when configured
    fn create_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(key) = &self.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|e| ApiError::RequestError(format!("Invalid API key value: {}", e)))?;
            headers.insert("x-cg-demo-api-key", value);
        }

        Ok(headers)
    }

    /// Map a non-success response to an error by HTTP status class
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            429 => {
                warn!("CoinGecko rate limit hit: {}", body_text);
                ApiError::RateLimited(body_text)
            }
            500..=599 => {
                warn!("CoinGecko server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// GET /simple/price
    ///
    /// Current USD price and 24h percent change for a coin identifier.
    /// An identifier absent from the response body is not an upstream error;
    /// the returned quote simply carries empty fields.
    pub async fn simple_price(&self, coin_id: &str) -> Result<SimplePriceQuote, ApiError> {
        rate_limit_coingecko_api().await;

        let url = format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_24hr_change=true",
            self.base_url, coin_id
        );
        let headers = self.create_headers()?;

        let response = self
            .http_client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response
            .json::<SimplePriceResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        Ok(body.get(coin_id).cloned().unwrap_or_default())
    }

    /// GET /coins/{id}/market_chart
    ///
    /// Historical USD price series for a coin over the given number of days.
    pub async fn market_chart(
        &self,
        coin_id: &str,
        days: u32,
    ) -> Result<MarketChartResponse, ApiError> {
        rate_limit_coingecko_api().await;

        let url = format!(
            "{}/coins/{}/market_chart?vs_currency=usd&days={}",
            self.base_url, coin_id, days
        );
        let headers = self.create_headers()?;

        let response = self
            .http_client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<MarketChartResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}
