//! Error types for the market data crate.
//!
//! [`MarketDataError`] is what individual providers return. The ticker
//! resolver absorbs these errors; they never reach its callers.

use thiserror::Error;

/// Errors that can occur while looking a symbol up with a provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider answered but does not know the symbol, or returned no
    /// usable display name for it.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rate limited the request (HTTP 429, or quota exhausted).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider response could not be decoded.
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse {
        provider: String,
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether the provider positively reported that the symbol does not exist.
    ///
    /// Every other variant is a transport or provider failure, which callers
    /// may choose to route to a backup path.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SymbolNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_not_found_is_not_found() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert!(error.is_not_found());
    }

    #[test]
    fn test_transport_failures_are_not_not_found() {
        let timeout = MarketDataError::Timeout {
            provider: "YAHOO".to_string(),
        };
        let limited = MarketDataError::RateLimited {
            provider: "FINNHUB".to_string(),
        };
        assert!(!timeout.is_not_found());
        assert!(!limited.is_not_found());
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("AAPL".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: AAPL");

        let error = MarketDataError::RateLimited {
            provider: "YAHOO".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: YAHOO");

        let error = MarketDataError::ProviderError {
            provider: "FINNHUB".to_string(),
            message: "HTTP 500".to_string(),
        };
        assert_eq!(format!("{}", error), "Provider error: FINNHUB - HTTP 500");
    }
}
