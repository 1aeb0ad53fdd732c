use std::fs;

use tracing::info;

use crate::models::Timeframe;
use crate::services::chart_service;
use crate::services::price_service::PriceFetcher;

pub async fn execute(fetcher: &PriceFetcher, args: &[&str]) -> Result<(), String> {
    info!("🎨 Chart command called with args: {:?}", args);

    if args.is_empty() {
        return Err(
            "❌ Usage: `orbitalverse chart <SYMBOL> [timeframe] [output.png]`\nTimeframes: 1d, 7d, 30d, 1y"
                .to_string(),
        );
    }

    let symbol = args[0].trim().to_uppercase();
    let timeframe: Timeframe = args.get(1).copied().unwrap_or("7d").parse()?;
    let default_output = format!("chart_{}_{}.png", symbol, timeframe);
    let output = args.get(2).copied().unwrap_or(default_output.as_str());

    let price_info = fetcher.get_price(&symbol, timeframe).await;
    info!(
        "Rendering chart for {} from {} samples",
        symbol,
        price_info.price_data.len()
    );

    let image = chart_service::generate_chart(&price_info.price_data, &symbol, timeframe, 1024, 768)?;

    fs::write(output, &image).map_err(|e| format!("Failed to write chart file: {}", e))?;
    info!("✓ Chart written to {} ({} bytes)", output, image.len());

    println!("🖼️  Chart saved to {}", output);
    Ok(())
}
