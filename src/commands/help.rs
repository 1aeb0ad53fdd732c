/// Print CLI usage
pub fn execute() {
    println!("🪐 OrbitalVerse — token price explorer");
    println!();
    println!("Usage: orbitalverse <command> [args]");
    println!();
    println!("Commands:");
    println!("  price <SYMBOL> [timeframe]             Show current price and 24h change");
    println!("  chart <SYMBOL> [timeframe] [out.png]   Render a price history chart");
    println!("  tokens [query]                         List tokens from the token list");
    println!("  help                                   Show this help message");
    println!();
    println!("Timeframes: 1d, 7d, 30d, 1y (default: 7d)");
    println!();
    println!("Environment:");
    println!("  COINGECKO_API_KEY         Optional demo API key sent with price requests");
    println!("  TOKEN_LIST_URL            Override the token-list endpoint");
    println!("  ORBITALVERSE_SYMBOL_MAP   Extra SYMBOL=coingecko-id pairs, comma separated");
}
