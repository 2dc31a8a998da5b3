/// Search ceiling granted to an identity the first time it is seen
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

/// Registered tickers are at most this many characters
pub const TICKER_MAX_LEN: usize = 10;

/// Symbols passed to search/validation may carry an exchange suffix
pub const LOOKUP_SYMBOL_MAX_LEN: usize = 20;

pub const COMPANY_NAME_MAX_LEN: usize = 255;
