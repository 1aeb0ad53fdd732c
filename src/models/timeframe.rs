//! Historical lookback windows for price queries

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Requested historical window for a price query.
///
/// Only the four windows the price provider is queried with are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    OneDay,
    SevenDays,
    ThirtyDays,
    OneYear,
}

impl Timeframe {
    /// Day count passed to the market-chart endpoint
    pub fn days(&self) -> u32 {
        match self {
            Timeframe::OneDay => 1,
            Timeframe::SevenDays => 7,
            Timeframe::ThirtyDays => 30,
            Timeframe::OneYear => 365,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneDay => "1d",
            Timeframe::SevenDays => "7d",
            Timeframe::ThirtyDays => "30d",
            Timeframe::OneYear => "1y",
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1d" => Ok(Timeframe::OneDay),
            "7d" => Ok(Timeframe::SevenDays),
            "30d" => Ok(Timeframe::ThirtyDays),
            "1y" => Ok(Timeframe::OneYear),
            _ => Err(format!(
                "❌ Unknown timeframe: '{}'. Supported: 1d, 7d, 30d, 1y",
                s
            )),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
