use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normalized result of a single provider lookup.
///
/// Every provider decodes its own wire format and hands back this shape, so
/// nothing provider-specific escapes the provider module.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerProfile {
    /// The symbol the provider was asked about, suffix included.
    pub symbol: String,
    /// Display name. `None` when the provider returned nothing usable.
    pub company_name: Option<String>,
    /// Latest known price. Never zero or negative.
    pub current_price: Option<Decimal>,
}

impl TickerProfile {
    /// Builds a profile, discarding blank names and non-positive prices.
    pub fn new(
        symbol: impl Into<String>,
        company_name: Option<String>,
        current_price: Option<Decimal>,
    ) -> Self {
        let company_name = company_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        let current_price = current_price.filter(|price| *price > Decimal::ZERO);

        Self {
            symbol: symbol.into(),
            company_name,
            current_price,
        }
    }

    /// A result only counts as a hit when it carries a display name.
    pub fn has_display_name(&self) -> bool {
        self.company_name.is_some()
    }
}

/// Converts a raw provider float into a price.
///
/// NaN, infinities, zero and negative values are treated as "no price".
pub fn price_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    Decimal::from_f64_retain(value).map(|d| d.round_dp(4).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_blank_name_is_dropped() {
        let profile = TickerProfile::new("AAPL", Some("   ".to_string()), Some(dec!(10)));
        assert!(profile.company_name.is_none());
        assert!(!profile.has_display_name());
    }

    #[test]
    fn test_name_is_trimmed() {
        let profile = TickerProfile::new("AAPL", Some(" Apple Inc. ".to_string()), None);
        assert_eq!(profile.company_name.as_deref(), Some("Apple Inc."));
    }

    #[test]
    fn test_zero_price_is_absent() {
        let profile = TickerProfile::new("AAPL", Some("Apple".to_string()), Some(dec!(0)));
        assert!(profile.current_price.is_none());
        assert!(profile.has_display_name());
    }

    #[test]
    fn test_price_from_f64() {
        assert_eq!(price_from_f64(175.5), Some(dec!(175.5)));
        assert_eq!(price_from_f64(123.45), Some(dec!(123.45)));
        assert_eq!(price_from_f64(0.0), None);
        assert_eq!(price_from_f64(-3.0), None);
        assert_eq!(price_from_f64(f64::NAN), None);
        assert_eq!(price_from_f64(f64::INFINITY), None);
    }
}
