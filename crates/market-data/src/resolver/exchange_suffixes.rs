//! Exchange suffix handling for ticker symbols.
//!
//! Yahoo-style symbols identify non-US listings with a dot suffix
//! (e.g., `RELIANCE.NS` for NSE, `RELIANCE.BO` for BSE).

/// Suffixes that mark a symbol as already exchange-qualified.
///
/// Symbols ending in one of these are never auto-detected.
pub const RECOGNIZED_SUFFIXES: &[&str] = &[".NS", ".BO", ".N", ".O", ".L"];

/// Markets probed when a bare symbol misses on the primary provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Market {
    /// National Stock Exchange of India
    Nse,
    /// Bombay Stock Exchange
    Bse,
}

impl Market {
    /// Auto-detection order. NSE is tried before BSE.
    pub const AUTO_DETECT_ORDER: [Market; 2] = [Market::Nse, Market::Bse];

    pub fn suffix(&self) -> &'static str {
        match self {
            Market::Nse => ".NS",
            Market::Bse => ".BO",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Market::Nse => "NSE",
            Market::Bse => "BSE",
        }
    }

    /// Returns the symbol qualified for this market.
    pub fn qualify(&self, symbol: &str) -> String {
        format!("{}{}", symbol, self.suffix())
    }
}

/// Uppercases and trims a user-supplied ticker.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Whether the (normalized) symbol already carries a recognized suffix.
pub fn has_recognized_suffix(symbol: &str) -> bool {
    RECOGNIZED_SUFFIXES
        .iter()
        .any(|suffix| symbol.ends_with(suffix))
}
