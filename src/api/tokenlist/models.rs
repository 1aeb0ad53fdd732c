use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single token entry from a published token list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub address: String,
    pub name: String,
    pub symbol: String,
    #[serde(rename = "chainId")]
    pub chain_id: u64,
    pub decimals: u8,
    #[serde(rename = "logoURI", default)]
    pub logo_uri: String,
}

/// Version stamp of a published token list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenListVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// A token-list document as published by Ubeswap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenList {
    pub name: String,
    #[serde(rename = "logoURI", default)]
    pub logo_uri: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub timestamp: String,
    pub tokens: Vec<Token>,
    pub version: TokenListVersion,
}

/// Errors from the token-list client
#[derive(Debug, Error)]
pub enum TokenListError {
    #[error("HTTP error ({0}): {1}")]
    HttpError(u16, String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}
