pub mod client;
pub mod models;

pub use client::TokenListClient;
pub use models::{Token, TokenList, TokenListError};
