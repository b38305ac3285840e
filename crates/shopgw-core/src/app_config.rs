use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which upstream catalog API backs the shop.
///
/// The two dialects return structurally different product payloads; the
/// catalog client maps both into one common shape, so everything downstream
/// of the fetch is provider-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    SellAuth,
    LemonSqueezy,
}

impl Provider {
    /// Base URL used when `SHOPGW_CATALOG_BASE_URL` is not set.
    #[must_use]
    pub fn default_catalog_base_url(self) -> &'static str {
        match self {
            Provider::SellAuth => "https://api.sellauth.com/v1",
            Provider::LemonSqueezy => "https://api.lemonsqueezy.com/v1",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::SellAuth => write!(f, "sellauth"),
            Provider::LemonSqueezy => write!(f, "lemonsqueezy"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub provider: Provider,
    pub shop_id: String,
    pub catalog_api_key: String,
    /// `None` means "use the provider's default base URL".
    pub catalog_base_url: Option<String>,
    pub cdn_account_hash: String,
    pub checkout_base_url: String,
    /// Falls back to `catalog_api_key` when absent.
    pub checkout_api_key: Option<String>,
    pub checkout_success_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("provider", &self.provider)
            .field("shop_id", &self.shop_id)
            .field("catalog_api_key", &"[redacted]")
            .field("catalog_base_url", &self.catalog_base_url)
            .field("cdn_account_hash", &self.cdn_account_hash)
            .field("checkout_base_url", &self.checkout_base_url)
            .field(
                "checkout_api_key",
                &self.checkout_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("checkout_success_url", &self.checkout_success_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
