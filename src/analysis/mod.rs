/// Early-buyer analysis pipeline
///
/// validate → supply → discover → enrich → classify → aggregate. Supply and
/// discovery failures abort the request; enrichment failures only blank the
/// affected wallet's fields.

pub mod aggregator;
pub mod classifier;
pub mod discovery;
pub mod enricher;
pub mod types;

pub use classifier::{classify, HolderStatus};
pub use discovery::{DiscoveryLimits, EarlyBuyerDiscoverer};
pub use enricher::{map_bounded, WalletEnricher};
pub use types::*;

use tracing::{info, instrument};

use crate::client::{ChainDataSource, HeliusClient};
use crate::config::AnalyzerConfig;
use crate::error::Result;

pub struct EarlyBuyerAnalyzer<S: ChainDataSource> {
    source: S,
    limits: DiscoveryLimits,
    enrich_concurrency: usize,
}

impl EarlyBuyerAnalyzer<HeliusClient> {
    /// Analyzer backed by the Helius API.
    pub fn from_config(config: AnalyzerConfig) -> Result<Self> {
        let analyzer_config = config.clone();
        let client = HeliusClient::new(config)?;
        Ok(Self::new(client, &analyzer_config))
    }
}

impl<S: ChainDataSource> EarlyBuyerAnalyzer<S> {
    pub fn new(source: S, config: &AnalyzerConfig) -> Self {
        Self {
            source,
            limits: DiscoveryLimits {
                max_pages: config.max_pages,
                oversample_factor: config.oversample_factor,
            },
            enrich_concurrency: config.enrich_concurrency,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    #[instrument(skip(self, request), fields(mint = %request.mint))]
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let ValidatedRequest { mint, limit } = request.validate()?;

        let total_supply = self.source.get_token_supply(&mint).await?;
        info!(mint = %mint, total_supply, limit, "📊 Token supply resolved");

        let earliest = EarlyBuyerDiscoverer::new(&self.source, self.limits)
            .discover(&mint, limit)
            .await?;

        let rows = WalletEnricher::new(&self.source, &mint, total_supply, self.enrich_concurrency)
            .enrich_all(&earliest)
            .await;

        let stats = aggregator::summarize(total_supply, &rows);
        info!(
            mint = %mint,
            rows = rows.len(),
            early_bought_sum = stats.early_bought_sum,
            early_remaining_sum = stats.early_remaining_sum,
            "✅ Analysis complete"
        );

        Ok(AnalysisResult { mint, stats, rows })
    }
}
