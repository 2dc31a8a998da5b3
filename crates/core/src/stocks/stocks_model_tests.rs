//! Tests for the stock category lifecycle rules.

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    use crate::errors::{Error, ValidationError};
    use crate::stocks::{
        apply_update, normalize_ticker, NewStock, Stock, StockCategory, StockListing,
        StockSubcategory, StockUpdate,
    };

    fn new_stock(ticker: &str, category: StockCategory) -> NewStock {
        NewStock {
            ticker: ticker.to_string(),
            company_name: "Apple Inc.".to_string(),
            category,
            subcategory: None,
            current_price: Some(dec!(175.50)),
        }
    }

    fn stock(ticker: &str, category: StockCategory) -> Stock {
        new_stock(ticker, category)
            .into_stock("U1", Utc::now())
            .unwrap()
    }

    // ==================== Creation ====================

    #[test]
    fn test_ticker_is_normalized() {
        let created = new_stock("  aapl ", StockCategory::Far)
            .into_stock("U1", Utc::now())
            .unwrap();
        assert_eq!(created.ticker, "AAPL");
        assert_eq!(created.created_by, "U1");
        assert!(created.state_history.is_empty());
    }

    #[test]
    fn test_ticker_length_bounds() {
        assert!(normalize_ticker("").is_err());
        assert!(normalize_ticker("   ").is_err());
        assert!(normalize_ticker("ABCDEFGHIJK").is_err());
        assert_eq!(normalize_ticker("abcdefghij").unwrap(), "ABCDEFGHIJ");
    }

    #[test]
    fn test_company_name_is_required() {
        let mut input = new_stock("AAPL", StockCategory::Far);
        input.company_name = "  ".to_string();
        assert!(matches!(
            input.into_stock("U1", Utc::now()),
            Err(Error::Validation(ValidationError::Length { field: "company_name", .. }))
        ));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let mut input = new_stock("AAPL", StockCategory::Far);
        input.current_price = Some(dec!(-1));
        assert!(input.into_stock("U1", Utc::now()).is_err());

        let mut input = new_stock("AAPL", StockCategory::Far);
        input.current_price = Some(dec!(0));
        assert!(input.into_stock("U1", Utc::now()).is_ok());
    }

    #[test]
    fn test_subcategory_requires_ready_on_create() {
        let mut input = new_stock("AAPL", StockCategory::Near);
        input.subcategory = Some(StockSubcategory::Pullback1);
        assert!(input.into_stock("U1", Utc::now()).is_err());

        let mut input = new_stock("AAPL", StockCategory::Ready);
        input.subcategory = Some(StockSubcategory::Pullback1);
        assert!(input.into_stock("U1", Utc::now()).is_ok());
    }

    // ==================== Updates ====================

    #[test]
    fn test_category_change_appends_one_record() {
        let now = Utc::now();
        let update = StockUpdate {
            category: Some(StockCategory::Ready),
            subcategory: Some(StockSubcategory::Pullback1),
            ..Default::default()
        };

        let updated = apply_update(stock("AAPL", StockCategory::Far), update, "U2", now).unwrap();

        assert_eq!(updated.category, StockCategory::Ready);
        assert_eq!(updated.subcategory, Some(StockSubcategory::Pullback1));
        assert_eq!(updated.state_history.len(), 1);
        let change = updated.latest_state_change().unwrap();
        assert_eq!(change.from, StockCategory::Far);
        assert_eq!(change.to, StockCategory::Ready);
        assert_eq!(change.changed_by, "U2");
        assert_eq!(change.changed_at, now);
        assert_eq!(updated.created_by, "U1");
    }

    #[test]
    fn test_same_category_appends_nothing() {
        let update = StockUpdate {
            category: Some(StockCategory::Far),
            ..Default::default()
        };

        let updated =
            apply_update(stock("AAPL", StockCategory::Far), update, "U2", Utc::now()).unwrap();

        assert!(updated.state_history.is_empty());
    }

    #[test]
    fn test_history_is_append_only() {
        let t0 = Utc::now();
        let mut current = stock("AAPL", StockCategory::Far);
        for (i, category) in [
            StockCategory::Ready,
            StockCategory::Near,
            StockCategory::Near,
            StockCategory::AlmostReady,
        ]
        .into_iter()
        .enumerate()
        {
            let update = StockUpdate {
                category: Some(category),
                ..Default::default()
            };
            current = apply_update(current, update, "U2", t0 + Duration::seconds(i as i64)).unwrap();
        }

        let transitions: Vec<_> = current
            .state_history
            .iter()
            .map(|c| (c.from, c.to))
            .collect();
        assert_eq!(
            transitions,
            vec![
                (StockCategory::Far, StockCategory::Ready),
                (StockCategory::Ready, StockCategory::Near),
                (StockCategory::Near, StockCategory::AlmostReady),
            ]
        );
    }

    #[test]
    fn test_leaving_ready_clears_subcategory() {
        let ready = apply_update(
            stock("AAPL", StockCategory::Far),
            StockUpdate {
                category: Some(StockCategory::Ready),
                subcategory: Some(StockSubcategory::Pullback2),
                ..Default::default()
            },
            "U2",
            Utc::now(),
        )
        .unwrap();

        let near = apply_update(
            ready,
            StockUpdate {
                category: Some(StockCategory::Near),
                ..Default::default()
            },
            "U2",
            Utc::now(),
        )
        .unwrap();

        assert_eq!(near.subcategory, None);
    }

    #[test]
    fn test_staying_ready_keeps_subcategory() {
        let ready = apply_update(
            stock("AAPL", StockCategory::Far),
            StockUpdate {
                category: Some(StockCategory::Ready),
                subcategory: Some(StockSubcategory::Pullback2),
                ..Default::default()
            },
            "U2",
            Utc::now(),
        )
        .unwrap();

        let renamed = apply_update(
            ready,
            StockUpdate {
                company_name: Some("Apple".to_string()),
                ..Default::default()
            },
            "U2",
            Utc::now(),
        )
        .unwrap();

        assert_eq!(renamed.subcategory, Some(StockSubcategory::Pullback2));
        assert_eq!(renamed.company_name, "Apple");
    }

    #[test]
    fn test_subcategory_without_ready_is_rejected_before_mutation() {
        let original = stock("AAPL", StockCategory::Far);
        let update = StockUpdate {
            company_name: Some("Changed".to_string()),
            category: Some(StockCategory::Near),
            subcategory: Some(StockSubcategory::Pullback1),
            ..Default::default()
        };

        let result = apply_update(original.clone(), update, "U2", Utc::now());

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(original.company_name, "Apple Inc.");
    }

    // ==================== Listing ====================

    #[test]
    fn test_listing_partitions_by_category() {
        let listing = StockListing::from_stocks(vec![
            stock("TSLA", StockCategory::Ready),
            stock("AAPL", StockCategory::Far),
            stock("MSFT", StockCategory::Far),
            stock("NVDA", StockCategory::AlmostReady),
        ]);

        assert_eq!(listing.total, 4);
        assert_eq!(
            listing.far.iter().map(|s| s.ticker.as_str()).collect::<Vec<_>>(),
            vec!["AAPL", "MSFT"]
        );
        assert!(listing.near.is_empty());
        assert_eq!(listing.almost_ready.len(), 1);
        assert_eq!(listing.ready.len(), 1);
        assert_eq!(
            listing.far.len() + listing.near.len() + listing.almost_ready.len() + listing.ready.len(),
            listing.total
        );
    }

    #[test]
    fn test_category_string_forms() {
        assert_eq!(
            serde_json::to_string(&StockCategory::AlmostReady).unwrap(),
            "\"almost_ready\""
        );
        assert_eq!(
            serde_json::to_string(&StockSubcategory::Pullback1).unwrap(),
            "\"pullback1\""
        );
        assert_eq!("READY".parse::<StockCategory>().unwrap(), StockCategory::Ready);
        assert_eq!(
            "Pullback2".parse::<StockSubcategory>().unwrap(),
            StockSubcategory::Pullback2
        );
        assert!("later".parse::<StockCategory>().is_err());
    }
}
