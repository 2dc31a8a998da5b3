use std::fmt;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::{ProviderId, TickerProfile};
use crate::resolver::Market;

/// Which attempt in the resolution chain produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationSource {
    /// Primary provider, literal symbol.
    Primary { provider: ProviderId },
    /// Primary provider, with an auto-detected market suffix appended.
    PrimaryMarket {
        provider: ProviderId,
        market: Market,
    },
    /// Fallback provider, literal symbol.
    Fallback { provider: ProviderId },
}

impl ValidationSource {
    pub fn provider(&self) -> ProviderId {
        match self {
            Self::Primary { provider }
            | Self::PrimaryMarket { provider, .. }
            | Self::Fallback { provider } => provider,
        }
    }
}

impl fmt::Display for ValidationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary { provider } | Self::Fallback { provider } => write!(f, "{}", provider),
            Self::PrimaryMarket { provider, market } => {
                write!(f, "{} ({})", provider, market.code())
            }
        }
    }
}

impl Serialize for ValidationSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of validating a ticker against the configured providers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub company_name: Option<String>,
    pub current_price: Option<Decimal>,
    /// `None` exactly when `is_valid` is false.
    pub source: Option<ValidationSource>,
}

impl ValidationResult {
    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            company_name: None,
            current_price: None,
            source: None,
        }
    }

    pub fn from_profile(profile: TickerProfile, source: ValidationSource) -> Self {
        Self {
            is_valid: true,
            company_name: profile.company_name,
            current_price: profile.current_price,
            source: Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_display() {
        let primary = ValidationSource::Primary { provider: "YAHOO" };
        let nse = ValidationSource::PrimaryMarket {
            provider: "YAHOO",
            market: Market::Nse,
        };
        let fallback = ValidationSource::Fallback {
            provider: "FINNHUB",
        };

        assert_eq!(primary.to_string(), "YAHOO");
        assert_eq!(nse.to_string(), "YAHOO (NSE)");
        assert_eq!(fallback.to_string(), "FINNHUB");
        assert_eq!(fallback.provider(), "FINNHUB");
    }

    #[test]
    fn test_source_serializes_as_string() {
        let source = ValidationSource::PrimaryMarket {
            provider: "YAHOO",
            market: Market::Bse,
        };
        let json = serde_json::to_string(&source).unwrap();
        assert_eq!(json, "\"YAHOO (BSE)\"");
    }

    #[test]
    fn test_invalid_has_no_source() {
        let result = ValidationResult::invalid();
        assert!(!result.is_valid);
        assert!(result.source.is_none());
        assert!(result.company_name.is_none());
    }
}
