/// Early-buyer discovery
///
/// Pages backward through a mint's enhanced transaction history, pulls
/// every credit of the mint out of the decoded `tokenTransfers`, then
/// keeps the earliest event per receiving wallet.
///
/// Paging is capped two ways: a fixed number of pages, and an oversampling
/// budget of `want * oversample_factor` raw events. Tokens with heavy
/// churn among few holders can exhaust the budget before `want` unique
/// wallets appear; the result is then simply shorter.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::client::ChainDataSource;
use crate::error::Result;
use crate::util::{coerce_number, resolve_token_amount};

use super::types::TransferEvent;

#[derive(Debug, Clone, Copy)]
pub struct DiscoveryLimits {
    pub max_pages: usize,
    pub oversample_factor: usize,
}

impl Default for DiscoveryLimits {
    fn default() -> Self {
        Self {
            max_pages: 15,
            oversample_factor: 8,
        }
    }
}

pub struct EarlyBuyerDiscoverer<'a, S: ChainDataSource + ?Sized> {
    source: &'a S,
    limits: DiscoveryLimits,
}

impl<'a, S: ChainDataSource + ?Sized> EarlyBuyerDiscoverer<'a, S> {
    pub fn new(source: &'a S, limits: DiscoveryLimits) -> Self {
        Self { source, limits }
    }

    /// First `want` unique receivers of `mint`, earliest first.
    #[instrument(skip(self))]
    pub async fn discover(&self, mint: &str, want: usize) -> Result<Vec<TransferEvent>> {
        let events = self.collect_transfer_events(mint, want).await?;
        let raw_count = events.len();
        let earliest = select_earliest_unique(events, want);

        info!(
            mint = %mint,
            raw_events = raw_count,
            unique_wallets = earliest.len(),
            "🔍 Early buyer discovery complete"
        );
        Ok(earliest)
    }

    async fn collect_transfer_events(&self, mint: &str, want: usize) -> Result<Vec<TransferEvent>> {
        let budget = want.saturating_mul(self.limits.oversample_factor);
        let mut events = Vec::new();
        let mut before: Option<String> = None;
        let mut pages = 0;

        while pages < self.limits.max_pages && events.len() < budget {
            let transactions = self.source.fetch_transaction_page(mint, before.as_deref()).await?;
            if transactions.is_empty() {
                debug!(mint = %mint, page = pages, "History exhausted");
                break;
            }

            for tx in &transactions {
                events.extend(extract_transfer_events(tx, mint));
            }

            before = transactions
                .last()
                .and_then(|tx| tx.get("signature"))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            pages += 1;

            debug!(
                mint = %mint,
                page = pages,
                transactions = transactions.len(),
                events = events.len(),
                "Fetched history page"
            );
        }

        Ok(events)
    }
}

/// Credits of `mint` in one decoded transaction.
///
/// Entries for other mints, entries without a receiver and self-transfers
/// are skipped.
pub fn extract_transfer_events(tx: &Value, mint: &str) -> Vec<TransferEvent> {
    let signature = tx
        .get("signature")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    // `timestamp` wins unless missing or zero
    let block_time = tx
        .get("timestamp")
        .and_then(coerce_number)
        .filter(|t| *t != 0.0)
        .or_else(|| tx.get("blockTime").and_then(coerce_number));

    let Some(transfers) = tx.get("tokenTransfers").and_then(Value::as_array) else {
        return Vec::new();
    };

    transfers
        .iter()
        .filter(|t| t.get("mint").and_then(Value::as_str) == Some(mint))
        .filter_map(|t| {
            let to_user = t
                .get("toUserAccount")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())?;
            let from_user = t.get("fromUserAccount").and_then(Value::as_str);
            if from_user == Some(to_user) {
                return None;
            }

            Some(TransferEvent {
                wallet: to_user.to_string(),
                signature: signature.clone(),
                block_time,
                token_bought: resolve_token_amount(t),
            })
        })
        .collect()
}

/// Stable-sort by time, then keep the first event per wallet until `want`
/// wallets are collected.
pub fn select_earliest_unique(mut events: Vec<TransferEvent>, want: usize) -> Vec<TransferEvent> {
    events.sort_by(|a, b| a.sort_key().total_cmp(&b.sort_key()));

    let mut seen = HashSet::new();
    let mut earliest = Vec::with_capacity(want.min(events.len()));
    for event in events {
        if earliest.len() >= want {
            break;
        }
        if seen.insert(event.wallet.clone()) {
            earliest.push(event);
        }
    }
    earliest
}
