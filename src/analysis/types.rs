/// Request and result types for early-buyer analysis

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::classifier::HolderStatus;
use crate::error::{AnalyzerError, Result};
use crate::util::coerce_number;

pub const DEFAULT_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 100;
const MIN_MINT_LEN: usize = 32;
const MAX_MINT_LEN: usize = 60;

/// A token credit to `wallet` extracted from a decoded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferEvent {
    pub wallet: String,
    pub signature: String,
    /// Unix seconds; missing values sort as 0
    pub block_time: Option<f64>,
    pub token_bought: Option<f64>,
}

impl TransferEvent {
    pub fn sort_key(&self) -> f64 {
        self.block_time.unwrap_or(0.0)
    }
}

/// One enriched early buyer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletRow {
    pub wallet: String,
    pub signature: String,
    pub sol_balance: Option<f64>,
    pub status: HolderStatus,
    pub token_bought: f64,
    pub pct_supply_bought: Option<f64>,
    pub remaining_tokens: Option<f64>,
    pub pct_supply_remaining: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub total_supply: f64,
    pub early_bought_sum: f64,
    pub early_remaining_sum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub mint: String,
    pub stats: AnalysisStats,
    pub rows: Vec<WalletRow>,
}

/// Analysis request as received from a caller. `limit` is loosely typed:
/// numbers and numeric strings are accepted, anything else falls back to
/// the default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub mint: String,
    #[serde(default)]
    pub limit: Option<Value>,
}

/// Request after validation and clamping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub mint: String,
    pub limit: usize,
}

impl AnalysisRequest {
    pub fn new(mint: impl Into<String>, limit: Option<usize>) -> Self {
        Self {
            mint: mint.into(),
            limit: limit.map(Value::from),
        }
    }

    pub fn validate(&self) -> Result<ValidatedRequest> {
        let len = self.mint.chars().count();
        if !(MIN_MINT_LEN..=MAX_MINT_LEN).contains(&len) {
            return Err(AnalyzerError::Validation("Invalid mint address.".to_string()));
        }

        Ok(ValidatedRequest {
            mint: self.mint.clone(),
            limit: clamp_limit(self.limit.as_ref()),
        })
    }
}

/// Absent, zero or non-numeric limits become the default; everything else
/// is clamped into `1..=MAX_LIMIT` and truncated.
pub fn clamp_limit(limit: Option<&Value>) -> usize {
    match limit.and_then(coerce_number) {
        Some(n) if n != 0.0 => n.clamp(1.0, MAX_LIMIT as f64) as usize,
        _ => DEFAULT_LIMIT,
    }
}
