use tracing::info;

use crate::models::Timeframe;
use crate::services::price_service::PriceFetcher;
use crate::utils::{format_percentage_change, format_price};

pub async fn execute(fetcher: &PriceFetcher, args: &[&str]) -> Result<(), String> {
    info!("💹 Price command called with args: {:?}", args);

    if args.is_empty() {
        return Err(
            "❌ Usage: `orbitalverse price <SYMBOL> [timeframe]`\nTimeframes: 1d, 7d, 30d, 1y"
                .to_string(),
        );
    }

    let symbol = args[0].trim().to_uppercase();
    let timeframe: Timeframe = args.get(1).copied().unwrap_or("7d").parse()?;

    let price_info = fetcher.get_price(&symbol, timeframe).await;

    println!("💹 {} ({})", symbol, timeframe);
    println!("  Price:      ${}", format_price(price_info.current_price));
    println!(
        "  24h Change: {}",
        format_percentage_change(price_info.price_change_24h)
    );
    println!(
        "  History:    {} samples over {}",
        price_info.price_data.len(),
        timeframe
    );

    Ok(())
}
