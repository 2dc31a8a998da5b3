use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use stockwatch_core::constants::DEFAULT_SEARCH_LIMIT;
use stockwatch_market_data::Market;

use crate::auth::decode_secret_key;

/// Primary ticker lookup source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerProviderKind {
    Yahoo,
    /// Built-in catalog; no network access.
    Static,
}

impl FromStr for TickerProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "static" => Ok(Self::Static),
            other => anyhow::bail!("Unknown ticker provider '{other}' (expected yahoo or static)"),
        }
    }
}

/// Where search quotas live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitStoreKind {
    Sqlite,
    /// Process-local; quotas reset on restart.
    Memory,
}

impl FromStr for RateLimitStoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("Unknown rate limit store '{other}' (expected sqlite or memory)"),
        }
    }
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub jwt_secret: Vec<u8>,
    pub ticker_provider: TickerProviderKind,
    pub finnhub_api_key: Option<String>,
    pub provider_timeout: Duration,
    pub auto_detect_markets: bool,
    pub default_search_limit: u32,
    pub rate_limit_store: RateLimitStoreKind,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("SW_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid SW_LISTEN_ADDR")?;
        let db_path = env_or("SW_DB_PATH", "./db/stockwatch.db");
        let cors_allow = env_or("SW_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_or("SW_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);

        let raw_secret = std::env::var("SW_JWT_SECRET").context("SW_JWT_SECRET must be set")?;
        let jwt_secret = decode_secret_key(&raw_secret)?;

        let ticker_provider = env_or("SW_TICKER_PROVIDER", "yahoo").parse()?;
        let finnhub_api_key = std::env::var("SW_FINNHUB_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let provider_timeout_ms: u64 = env_or("SW_PROVIDER_TIMEOUT_MS", "5000")
            .parse()
            .unwrap_or(5000);
        let auto_detect_markets = !matches!(
            env_or("SW_AUTO_DETECT_MARKETS", "true")
                .trim()
                .to_ascii_lowercase()
                .as_str(),
            "false" | "0" | "no" | "off"
        );
        let default_search_limit = env_or("SW_DEFAULT_SEARCH_LIMIT", "")
            .parse()
            .unwrap_or(DEFAULT_SEARCH_LIMIT);
        let rate_limit_store = env_or("SW_RATE_LIMIT_STORE", "sqlite").parse()?;

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            ticker_provider,
            finnhub_api_key,
            provider_timeout: Duration::from_millis(provider_timeout_ms),
            auto_detect_markets,
            default_search_limit,
            rate_limit_store,
        })
    }

    /// Longest a single ticker resolution can take: every provider attempt
    /// in the chain running into its timeout.
    pub fn resolver_worst_case(&self) -> Duration {
        let mut attempts = 1;
        if self.auto_detect_markets {
            attempts += Market::AUTO_DETECT_ORDER.len() as u32;
        }
        if self.finnhub_api_key.is_some() {
            attempts += 1;
        }
        self.provider_timeout * attempts
    }

    /// The request timeout, raised when needed so a search is never cut off
    /// after resolution, while its quota charge is committing. One extra
    /// provider timeout is left for the charge itself.
    pub fn effective_request_timeout(&self) -> Duration {
        let floor = self.resolver_worst_case() + self.provider_timeout;
        self.request_timeout.max(floor)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
