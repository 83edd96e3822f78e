/// Ticker symbols users commonly type, mapped to CoinGecko coin ids.
const SYMBOL_ALIASES: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("eth", "ethereum"),
    ("sol", "solana"),
    ("ada", "cardano"),
    ("xrp", "ripple"),
    ("doge", "dogecoin"),
    ("dot", "polkadot"),
    ("matic", "matic-network"),
    ("link", "chainlink"),
    ("ltc", "litecoin"),
];

/// Resolve a user-supplied symbol or id to a CoinGecko id.
/// Unknown symbols pass through lowercased.
pub fn resolve_coin_id(input: &str) -> String {
    let symbol = input.trim().to_lowercase();
    SYMBOL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == symbol)
        .map(|(_, id)| (*id).to_string())
        .unwrap_or(symbol)
}

/// Split a `coins=a,b,c` query value into resolved ids, dropping blanks.
pub fn parse_coin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(resolve_coin_id)
        .collect()
}
