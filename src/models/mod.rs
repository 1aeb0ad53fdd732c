//! Data models for OrbitalVerse commands and services
//!
//! This module organizes the data structs shared across the price fetcher,
//! chart rendering and the CLI commands.

pub mod price;
pub mod timeframe;

// Re-export commonly used types for convenience
pub use price::{PriceInfo, PriceSample};
pub use timeframe::Timeframe;
