//! Runtime configuration: the symbol mapping table and provider endpoints
//!
//! The symbol map is an explicit structure seeded with the known tickers and
//! extensible through the environment, so new tokens can be supported without
//! code changes.

use std::collections::HashMap;

use tracing::warn;

/// Default token-list document (Ubeswap token list on Celo)
pub const DEFAULT_TOKEN_LIST_URL: &str =
    "https://raw.githubusercontent.com/Ubeswap/default-token-list/master/ubeswap.token-list.json";

/// Mapping from uppercase ticker symbols to CoinGecko coin identifiers.
///
/// Absence of a symbol is a valid, expected state ("unsupported symbol"),
/// not an error.
#[derive(Debug, Clone)]
pub struct SymbolMap {
    entries: HashMap<String, String>,
}

impl SymbolMap {
    /// Tickers known to the original token universe
    const DEFAULTS: &'static [(&'static str, &'static str)] = &[
        ("CELO", "celo"),
        ("CUSD", "celo-dollar"),
        ("CEUR", "celo-euro"),
        ("CREAL", "celo-real"),
        ("BTC", "bitcoin"),
        ("ETH", "ethereum"),
        ("USDC", "usd-coin"),
        ("USDT", "tether"),
        ("WETH", "weth"),
        ("WBTC", "wrapped-bitcoin"),
        ("DAI", "dai"),
        ("LINK", "chainlink"),
        ("UNI", "uniswap"),
        ("AAVE", "aave"),
        ("COMP", "compound-governance-token"),
        ("CRV", "curve-dao-token"),
        ("SUSHI", "sushi"),
        ("YFI", "yearn-finance"),
        ("SNX", "havven"),
        ("BAL", "balancer"),
    ];

    /// Create an empty map
    pub fn new() -> Self {
        SymbolMap {
            entries: HashMap::new(),
        }
    }

    /// Create a map seeded with the default ticker set
    pub fn with_defaults() -> Self {
        Self::from_pairs(Self::DEFAULTS)
    }

    /// Create a map from explicit (symbol, coin id) pairs
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut map = Self::new();
        for (symbol, id) in pairs {
            map.insert(symbol, id);
        }
        map
    }

    /// Add or replace a mapping. Symbols are stored uppercased.
    pub fn insert(&mut self, symbol: &str, coin_id: &str) {
        self.entries
            .insert(symbol.to_uppercase(), coin_id.to_string());
    }

    /// Resolve a ticker to its CoinGecko identifier (case-insensitive)
    pub fn resolve(&self, symbol: &str) -> Option<&str> {
        self.entries
            .get(&symbol.to_uppercase())
            .map(|id| id.as_str())
    }

    /// Merge extra mappings from `ORBITALVERSE_SYMBOL_MAP`.
    ///
    /// Format: comma-separated `SYMBOL=coingecko-id` pairs. Malformed pairs
    /// are skipped with a warning instead of aborting startup.
    pub fn apply_env_overrides(&mut self) {
        let Ok(raw) = std::env::var("ORBITALVERSE_SYMBOL_MAP") else {
            return;
        };

        for pair in raw.split(',') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            match pair.split_once('=') {
                Some((symbol, id)) if !symbol.trim().is_empty() && !id.trim().is_empty() => {
                    self.insert(symbol.trim(), id.trim());
                }
                _ => warn!("Ignoring malformed symbol mapping: '{}'", pair),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SymbolMap {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Optional demo API key sent with CoinGecko requests
pub fn coingecko_api_key() -> Option<String> {
    std::env::var("COINGECKO_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
}

/// Token-list endpoint, overridable via `TOKEN_LIST_URL`
pub fn token_list_url() -> String {
    std::env::var("TOKEN_LIST_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TOKEN_LIST_URL.to_string())
}
