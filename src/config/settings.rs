/// Analyzer configuration structures

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalyzerError, Result};

pub const API_KEY_ENV: &str = "HELIUS_API_KEY";
pub const RPC_URL_ENV: &str = "HELIUS_RPC_URL";
pub const API_URL_ENV: &str = "HELIUS_API_URL";

const DEFAULT_RPC_URL: &str = "https://mainnet.helius-rpc.com";
const DEFAULT_API_URL: &str = "https://api-mainnet.helius-rpc.com";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Helius API key, sent as the `api-key` query parameter on every call
    pub api_key: String,
    /// JSON-RPC endpoint (no trailing slash)
    pub rpc_url: String,
    /// Base of the enhanced transactions REST API
    pub enhanced_api_url: String,
    /// Transactions requested per history page
    pub page_size: u32,
    /// Hard cap on history pages fetched per request
    pub max_pages: usize,
    /// Discovery stops once `limit * oversample_factor` raw events are seen
    pub oversample_factor: usize,
    /// Wallets enriched concurrently
    pub enrich_concurrency: usize,
    /// Client-wide request timeout; unset means no timeout
    pub request_timeout_secs: Option<u64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            enhanced_api_url: DEFAULT_API_URL.to_string(),
            page_size: 100,
            max_pages: 15,
            oversample_factor: 8,
            enrich_concurrency: 5,
            request_timeout_secs: None,
        }
    }
}

impl AnalyzerConfig {
    /// Build from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        config.api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        if let Ok(url) = std::env::var(RPC_URL_ENV) {
            config.rpc_url = url;
        }
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.enhanced_api_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnalyzerError::Config(format!("Failed to read config {}: {}", path, e)))?;
        let mut config: Self = toml::from_str(&content)
            .map_err(|e| AnalyzerError::Config(format!("Failed to parse config {}: {}", path, e)))?;

        if config.api_key.is_empty() {
            dotenvy::dotenv().ok();
            config.api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        }

        debug!(path = %path, "Loaded analyzer config");
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(AnalyzerError::Config(format!("Missing {} env var.", API_KEY_ENV)));
        }
        if self.page_size == 0 || self.max_pages == 0 || self.oversample_factor == 0 || self.enrich_concurrency == 0 {
            return Err(AnalyzerError::Config(
                "page_size, max_pages, oversample_factor and enrich_concurrency must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn rpc_endpoint(&self) -> String {
        format!("{}/", self.rpc_url.trim_end_matches('/'))
    }

    pub fn transactions_endpoint(&self, address: &str) -> String {
        format!("{}/v0/addresses/{}/transactions", self.enhanced_api_url.trim_end_matches('/'), address)
    }
}
