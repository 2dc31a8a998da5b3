#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal_macros::dec;

    use crate::errors::Error;
    use crate::stocks::{
        NewStock, StockCategory, StockService, StockServiceTrait, StockSubcategory, StockUpdate,
    };
    use crate::test_support::{admin, MockStockRepository};
    use crate::{Identity, Role};

    fn aapl() -> NewStock {
        NewStock {
            ticker: "aapl".to_string(),
            company_name: "Apple Inc.".to_string(),
            category: StockCategory::Far,
            subcategory: None,
            current_price: Some(dec!(175.50)),
        }
    }

    #[tokio::test]
    async fn test_create_then_duplicate() {
        let service = StockService::new(Arc::new(MockStockRepository::new()));
        let cap = admin().admin_capability().unwrap();

        let created = service.create_stock(&cap, aapl()).await.unwrap();
        assert_eq!(created.ticker, "AAPL");
        assert_eq!(created.created_by, "admin-1");

        let mut again = aapl();
        again.ticker = "AAPL ".to_string();
        assert!(matches!(
            service.create_stock(&cap, again).await,
            Err(Error::DuplicateKey { .. })
        ));
    }

    #[tokio::test]
    async fn test_end_to_end_category_lifecycle() {
        let service = StockService::new(Arc::new(MockStockRepository::new()));
        let creator = Identity::new("U1", "creator", Role::Admin);
        let editor = Identity::new("U2", "editor", Role::Admin);
        let creator_cap = creator.admin_capability().unwrap();
        let editor_cap = editor.admin_capability().unwrap();

        service.create_stock(&creator_cap, aapl()).await.unwrap();

        let to_ready = StockUpdate {
            category: Some(StockCategory::Ready),
            subcategory: Some(StockSubcategory::Pullback1),
            ..Default::default()
        };
        let updated = service
            .update_stock(&editor_cap, "AAPL", to_ready)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.category, StockCategory::Ready);
        assert_eq!(updated.subcategory, Some(StockSubcategory::Pullback1));
        assert_eq!(updated.state_history.len(), 1);
        assert_eq!(updated.state_history[0].from, StockCategory::Far);
        assert_eq!(updated.state_history[0].to, StockCategory::Ready);
        assert_eq!(updated.state_history[0].changed_by, "U2");

        let again = StockUpdate {
            category: Some(StockCategory::Ready),
            ..Default::default()
        };
        let unchanged = service
            .update_stock(&editor_cap, "aapl", again)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.state_history.len(), 1);
        assert_eq!(unchanged.created_by, "U1");
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_stock_untouched() {
        let repo = MockStockRepository::new();
        let service = StockService::new(Arc::new(repo.clone()));
        let cap = admin().admin_capability().unwrap();
        service.create_stock(&cap, aapl()).await.unwrap();

        let bad = StockUpdate {
            category: Some(StockCategory::Near),
            subcategory: Some(StockSubcategory::Pullback2),
            current_price: Some(dec!(1)),
            ..Default::default()
        };
        assert!(service.update_stock(&cap, "AAPL", bad).await.is_err());

        let stored = service.get_stock(&cap, "AAPL").unwrap().unwrap();
        assert_eq!(stored.category, StockCategory::Far);
        assert_eq!(stored.current_price, Some(dec!(175.50)));
        assert!(stored.state_history.is_empty());
    }

    #[tokio::test]
    async fn test_missing_tickers_are_absent() {
        let service = StockService::new(Arc::new(MockStockRepository::new()));
        let cap = admin().admin_capability().unwrap();

        assert!(service.get_stock(&cap, "NONE").unwrap().is_none());
        assert!(service
            .update_stock(&cap, "NONE", StockUpdate::default())
            .await
            .unwrap()
            .is_none());
        assert!(!service.delete_stock(&cap, "NONE").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let service = StockService::new(Arc::new(MockStockRepository::new()));
        let cap = admin().admin_capability().unwrap();
        service.create_stock(&cap, aapl()).await.unwrap();
        let mut msft = aapl();
        msft.ticker = "MSFT".to_string();
        msft.category = StockCategory::Near;
        service.create_stock(&cap, msft).await.unwrap();

        let listing = service.list_stocks(&cap).unwrap();
        assert_eq!(listing.total, 2);
        assert_eq!(listing.far.len(), 1);
        assert_eq!(listing.near.len(), 1);

        assert!(service.delete_stock(&cap, "aapl").await.unwrap());
        assert_eq!(service.list_stocks(&cap).unwrap().total, 1);
    }
}
