use tracing::info;

use crate::api::tokenlist::TokenListClient;
use crate::config;
use crate::utils::Table;

pub async fn execute(args: &[&str]) -> Result<(), String> {
    info!("🪙 Tokens command called with args: {:?}", args);

    let client = TokenListClient::new(config::token_list_url()).map_err(|e| e.to_string())?;
    let list = client.fetch().await.map_err(|e| e.to_string())?;

    let query = args.first().map(|q| q.to_lowercase());
    let tokens: Vec<_> = list
        .tokens
        .iter()
        .filter(|t| match &query {
            Some(q) => t.symbol.to_lowercase().contains(q) || t.name.to_lowercase().contains(q),
            None => true,
        })
        .collect();

    if tokens.is_empty() {
        match query {
            Some(q) => println!("No tokens found matching \"{}\"", q),
            None => println!("No tokens in the list"),
        }
        return Ok(());
    }

    let mut table = Table::new(vec!["Symbol", "Name", "Chain", "Decimals"]);
    for token in &tokens {
        table.add_row(vec![
            &token.symbol,
            &token.name,
            &token.chain_id.to_string(),
            &token.decimals.to_string(),
        ]);
    }

    println!("🪙 {} — {} token(s)", list.name, tokens.len());
    println!("{}", table.render());
    Ok(())
}
