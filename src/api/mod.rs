pub mod coingecko;
pub mod tokenlist;
