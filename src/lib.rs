// Provider access
pub mod client;

// Configuration
pub mod config;

// Discovery, enrichment and classification pipeline
pub mod analysis;

pub mod error;
pub mod util;

// Re-export commonly used types for convenience
pub use analysis::{AnalysisRequest, AnalysisResult, AnalysisStats, EarlyBuyerAnalyzer, HolderStatus, TransferEvent, WalletRow};
pub use client::{ChainDataSource, HeliusClient};
pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, Result};
