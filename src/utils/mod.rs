pub mod format;
pub mod ratelimit;
pub mod table;

pub use format::{format_percentage_change, format_price};
pub use ratelimit::rate_limit_coingecko_api;
pub use table::Table;
