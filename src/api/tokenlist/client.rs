use std::time::Duration;

use reqwest::Client as HttpClient;

use super::models::{TokenList, TokenListError};

/// Client for fetching a published token-list document
pub struct TokenListClient {
    http_client: HttpClient,
    url: String,
}

impl TokenListClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a new client for the given token-list URL
    pub fn new(url: String) -> Result<Self, TokenListError> {
        let http_client = HttpClient::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                TokenListError::RequestError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { http_client, url })
    }

    /// Fetch and parse the token-list document
    pub async fn fetch(&self) -> Result<TokenList, TokenListError> {
        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| TokenListError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body_text = response.text().await.unwrap_or_default();
            return Err(TokenListError::HttpError(status, body_text));
        }

        response.json::<TokenList>().await.map_err(|e| {
            TokenListError::DeserializationError(format!("Failed to parse token list: {}", e))
        })
    }
}
