pub mod chart;
pub mod help;
pub mod price;
pub mod tokens;

use crate::api::coingecko::CoinGeckoClient;
use crate::config::{self, SymbolMap};
use crate::services::price_service::PriceFetcher;

/// Parse the command line and dispatch to the matching command
pub async fn run(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        help::execute();
        return Ok(());
    }

    let command = args[0].as_str();
    let rest: Vec<&str> = args[1..].iter().map(|s| s.as_str()).collect();

    match command {
        "price" => price::execute(&build_fetcher()?, &rest).await,
        "chart" => chart::execute(&build_fetcher()?, &rest).await,
        "tokens" | "list" => tokens::execute(&rest).await,
        "help" | "--help" | "-h" => {
            help::execute();
            Ok(())
        }
        _ => Err(format!(
            "❌ Unknown command: '{}'. Run `orbitalverse help` for usage.",
            command
        )),
    }
}

fn build_fetcher() -> Result<PriceFetcher, String> {
    let client = CoinGeckoClient::new(config::coingecko_api_key()).map_err(|e| e.to_string())?;

    let mut symbols = SymbolMap::with_defaults();
    symbols.apply_env_overrides();

    Ok(PriceFetcher::new(client, symbols))
}
