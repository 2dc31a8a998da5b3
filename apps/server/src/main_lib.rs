use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use stockwatch_core::{
    identities::{IdentityService, IdentityServiceTrait},
    rate_limits::{
        InMemoryRateLimitStore, RateLimitAdminService, RateLimitAdminServiceTrait,
        RateLimitService, RateLimitStoreTrait,
    },
    search::{SearchService, SearchServiceTrait},
    stocks::{StockService, StockServiceTrait},
};
use stockwatch_market_data::{
    FinnhubProvider, StaticProvider, TickerLookupProvider, TickerResolver, YahooProvider,
};
use stockwatch_storage_sqlite::{
    db::{self, DbPool},
    IdentityRepository, SqliteRateLimitStore, StockRepository,
};

use crate::auth::AuthManager;
use crate::config::{Config, RateLimitStoreKind, TickerProviderKind};

/// Lifetime of tokens signed by [`AuthManager::issue_token`].
const ISSUED_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

pub struct AppState {
    pub stock_service: Arc<dyn StockServiceTrait + Send + Sync>,
    pub search_service: Arc<dyn SearchServiceTrait + Send + Sync>,
    pub rate_limit_admin_service: Arc<dyn RateLimitAdminServiceTrait + Send + Sync>,
    pub identity_service: Arc<dyn IdentityServiceTrait + Send + Sync>,
    pub auth: Arc<AuthManager>,
    pub pool: Arc<DbPool>,
}

pub fn init_tracing() {
    let log_format = std::env::var("SW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone())?;

    let rate_limit_store: Arc<dyn RateLimitStoreTrait> = match config.rate_limit_store {
        RateLimitStoreKind::Sqlite => {
            Arc::new(SqliteRateLimitStore::new(pool.clone(), writer.clone()))
        }
        RateLimitStoreKind::Memory => {
            tracing::warn!("Using the in-memory rate limit store; quotas will not survive a restart");
            Arc::new(InMemoryRateLimitStore::new())
        }
    };
    let rate_limits = RateLimitService::new(rate_limit_store);

    let identity_repository = Arc::new(IdentityRepository::new(pool.clone(), writer.clone()));
    let identity_service = Arc::new(IdentityService::new(
        identity_repository.clone(),
        rate_limits.clone(),
        config.default_search_limit,
    ));
    let rate_limit_admin_service = Arc::new(RateLimitAdminService::new(
        rate_limits.clone(),
        identity_repository,
    ));

    let stock_repository = Arc::new(StockRepository::new(pool.clone(), writer.clone()));
    let stock_service = Arc::new(StockService::new(stock_repository.clone()));

    let resolver = Arc::new(build_resolver(config)?);
    tracing::info!(
        "Ticker resolver ready (primary: {:?}, fallback: {})",
        config.ticker_provider,
        resolver.has_fallback()
    );
    let search_service = Arc::new(SearchService::new(stock_repository, resolver, rate_limits));

    let auth = Arc::new(AuthManager::new(&config.jwt_secret, ISSUED_TOKEN_TTL));

    Ok(Arc::new(AppState {
        stock_service,
        search_service,
        rate_limit_admin_service,
        identity_service,
        auth,
        pool,
    }))
}

fn build_resolver(config: &Config) -> anyhow::Result<TickerResolver> {
    let primary: Arc<dyn TickerLookupProvider> = match config.ticker_provider {
        TickerProviderKind::Yahoo => Arc::new(YahooProvider::new(config.provider_timeout)?),
        TickerProviderKind::Static => Arc::new(StaticProvider::new()),
    };

    let mut resolver = TickerResolver::new(primary)
        .with_auto_detect_markets(config.auto_detect_markets)
        .with_attempt_timeout(config.provider_timeout);

    if let Some(api_key) = &config.finnhub_api_key {
        resolver = resolver.with_fallback(Arc::new(FinnhubProvider::new(
            api_key.clone(),
            config.provider_timeout,
        )));
    }

    Ok(resolver)
}
