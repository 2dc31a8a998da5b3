#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use rust_decimal_macros::dec;
    use stockwatch_market_data::{ValidationResult, ValidationSource};

    use crate::errors::Error;
    use crate::rate_limits::{InMemoryRateLimitStore, RateLimitService};
    use crate::search::{SearchService, SearchServiceTrait};
    use crate::stocks::{NewStock, StockCategory, StockRepositoryTrait};
    use crate::test_support::{user, MockStockRepository, MockValidator};

    struct Fixture {
        stocks: MockStockRepository,
        validator: MockValidator,
        limits: RateLimitService,
        service: SearchService,
    }

    fn fixture() -> Fixture {
        let stocks = MockStockRepository::new();
        let validator = MockValidator::new();
        let limits = RateLimitService::new(Arc::new(InMemoryRateLimitStore::new()));
        let service = SearchService::new(
            Arc::new(stocks.clone()),
            Arc::new(validator.clone()),
            limits.clone(),
        );
        Fixture {
            stocks,
            validator,
            limits,
            service,
        }
    }

    fn valid(name: &str) -> ValidationResult {
        ValidationResult {
            is_valid: true,
            company_name: Some(name.to_string()),
            current_price: Some(dec!(99.5)),
            source: Some(ValidationSource::Primary { provider: "YAHOO" }),
        }
    }

    async fn register(stocks: &MockStockRepository, ticker: &str, name: &str) {
        let stock = NewStock {
            ticker: ticker.to_string(),
            company_name: name.to_string(),
            category: StockCategory::Near,
            subcategory: None,
            current_price: Some(dec!(175.50)),
        }
        .into_stock("admin-1", Utc::now())
        .unwrap();
        stocks.insert_stock(stock).await.unwrap();
    }

    #[tokio::test]
    async fn test_valid_unregistered_ticker_is_charged_until_exhausted() {
        let f = fixture();
        f.validator.answer("ACME", valid("Acme Corp"));
        f.limits.initialize("u1", 2).await.unwrap();
        let caller = user("u1");

        let first = f.service.search(&caller, "acme").await.unwrap();
        assert!(!first.found);
        assert!(first.is_valid_ticker);
        assert_eq!(first.remaining_searches, 1);
        assert_eq!(first.company_name.as_deref(), Some("Acme Corp"));
        assert_eq!(first.message, "Valid ticker but not in our system");

        let second = f.service.search(&caller, "ACME").await.unwrap();
        assert_eq!(second.remaining_searches, 0);

        let third = f.service.search(&caller, "ACME").await;
        assert!(matches!(third, Err(Error::QuotaExceeded { .. })));
        assert_eq!(f.limits.get_remaining("u1").await.unwrap(), 0);

        let fourth = f.service.search(&caller, "ACME").await;
        assert!(matches!(fourth, Err(Error::QuotaExceeded { .. })));
        assert_eq!(f.limits.get_remaining("u1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_ticker_is_free() {
        let f = fixture();
        f.limits.initialize("u1", 3).await.unwrap();

        let result = f.service.search(&user("u1"), "zzzz").await.unwrap();

        assert!(!result.found);
        assert!(!result.is_valid_ticker);
        assert!(result.company_name.is_none());
        assert_eq!(result.remaining_searches, 3);
        assert_eq!(result.message, "Invalid ticker");
    }

    #[tokio::test]
    async fn test_invalid_ticker_with_zero_quota_still_answers() {
        let f = fixture();

        let result = f.service.search(&user("u1"), "ZZZZ").await.unwrap();

        assert!(!result.is_valid_ticker);
        assert_eq!(result.remaining_searches, 0);
    }

    #[tokio::test]
    async fn test_registry_hit_prefers_registry_data() {
        let f = fixture();
        register(&f.stocks, "AAPL", "Apple (registry)").await;
        f.validator.answer("AAPL", valid("Apple (provider)"));
        f.limits.initialize("u1", 5).await.unwrap();

        let result = f.service.search(&user("u1"), "aapl").await.unwrap();

        assert!(result.found);
        assert!(result.is_valid_ticker);
        assert_eq!(result.company_name.as_deref(), Some("Apple (registry)"));
        assert_eq!(result.current_price, Some(dec!(175.50)));
        assert_eq!(result.remaining_searches, 4);
        assert_eq!(result.message, "Stock found in our system");
        assert!(result.stock.is_some());
    }

    #[tokio::test]
    async fn test_registry_only_hit_is_not_charged_but_validator_is_consulted() {
        let f = fixture();
        register(&f.stocks, "PRIV", "Private Listing").await;
        f.limits.initialize("u1", 5).await.unwrap();

        let result = f.service.search(&user("u1"), "PRIV").await.unwrap();

        assert!(result.found);
        assert_eq!(result.remaining_searches, 5);
        assert_eq!(f.validator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_ticker_is_rejected_before_any_lookup() {
        let f = fixture();

        assert!(matches!(
            f.service.search(&user("u1"), "   ").await,
            Err(Error::Validation(_))
        ));
        assert!(f
            .service
            .search(&user("u1"), "ABCDEFGHIJKLMNOPQRSTUV")
            .await
            .is_err());
        assert_eq!(f.validator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_validate_ticker_does_not_charge() {
        let f = fixture();
        f.validator.answer("ACME", valid("Acme Corp"));
        f.limits.initialize("u1", 1).await.unwrap();

        let ok = f.service.validate_ticker(&user("u1"), "acme").await.unwrap();
        assert!(ok.is_valid);
        assert!(ok.error.is_none());
        assert_eq!(ok.ticker, "ACME");

        let miss = f.service.validate_ticker(&user("u1"), "nope").await.unwrap();
        assert!(!miss.is_valid);
        assert_eq!(miss.error.as_deref(), Some("Ticker not found"));
        assert!(miss.source.is_none());

        assert_eq!(f.limits.get_remaining("u1").await.unwrap(), 1);
    }
}
