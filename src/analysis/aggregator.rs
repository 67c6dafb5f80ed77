/// Supply fractions and summary statistics over enriched rows

use super::types::{AnalysisStats, WalletRow};

/// `value / total_supply`, or `None` when either side is unusable.
pub fn supply_fraction(value: Option<f64>, total_supply: f64) -> Option<f64> {
    if total_supply == 0.0 || !total_supply.is_finite() {
        return None;
    }
    value
        .filter(|v| v.is_finite())
        .map(|v| v / total_supply)
        .filter(|pct| pct.is_finite())
}

pub fn summarize(total_supply: f64, rows: &[WalletRow]) -> AnalysisStats {
    let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };

    AnalysisStats {
        total_supply,
        early_bought_sum: rows.iter().map(|r| finite_or_zero(r.token_bought)).sum(),
        early_remaining_sum: rows
            .iter()
            .map(|r| r.remaining_tokens.map(finite_or_zero).unwrap_or(0.0))
            .sum(),
    }
}
