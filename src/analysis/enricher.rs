/// Per-wallet enrichment with bounded concurrency
///
/// Each discovered wallet gets two lookups (SOL balance, remaining token
/// balance) issued together. Wallets are processed by a fixed pool of
/// workers pulling indices from a shared atomic cursor; results land in
/// the slot of their index so the output order never depends on which
/// lookup finished first.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::join_all;
use tracing::{debug, instrument, warn};

use crate::client::ChainDataSource;

use super::aggregator::supply_fraction;
use super::classifier::classify;
use super::types::{TransferEvent, WalletRow};

/// Run `f` over `items` with at most `workers` calls in flight.
///
/// Workers are polled together on the current task; each repeatedly claims
/// the next unclaimed index until the range is exhausted.
pub async fn map_bounded<'a, T, R, F, Fut>(items: &'a [T], workers: usize, f: F) -> Vec<R>
where
    F: Fn(usize, &'a T) -> Fut,
    Fut: Future<Output = R>,
{
    let cursor = AtomicUsize::new(0);
    let worker_count = workers.max(1).min(items.len());

    let cursor = &cursor;
    let f = &f;
    let runs = (0..worker_count).map(|_| async move {
        let mut completed = Vec::new();
        loop {
            let index = cursor.fetch_add(1, Ordering::SeqCst);
            if index >= items.len() {
                break;
            }
            completed.push((index, f(index, &items[index]).await));
        }
        completed
    });

    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(items.len()).collect();
    for (index, value) in join_all(runs).await.into_iter().flatten() {
        slots[index] = Some(value);
    }
    slots.into_iter().flatten().collect()
}

pub struct WalletEnricher<'a, S: ChainDataSource + ?Sized> {
    source: &'a S,
    mint: &'a str,
    total_supply: f64,
    concurrency: usize,
}

impl<'a, S: ChainDataSource + ?Sized> WalletEnricher<'a, S> {
    pub fn new(source: &'a S, mint: &'a str, total_supply: f64, concurrency: usize) -> Self {
        Self {
            source,
            mint,
            total_supply,
            concurrency,
        }
    }

    /// Enrich every event; rows come back in discovery order.
    #[instrument(skip(self, events), fields(mint = %self.mint, wallets = events.len()))]
    pub async fn enrich_all(&self, events: &[TransferEvent]) -> Vec<WalletRow> {
        map_bounded(events, self.concurrency, |_, event| self.enrich_one(event)).await
    }

    pub async fn enrich_one(&self, event: &TransferEvent) -> WalletRow {
        let wallet = event.wallet.as_str();
        let (sol_balance, remaining) = tokio::join!(
            self.source.get_sol_balance(wallet),
            self.source.get_token_balance_for_owner(wallet, self.mint),
        );

        let sol_balance = sol_balance
            .map_err(|e| warn!(wallet = %wallet, error = %e, "SOL balance lookup failed"))
            .ok();
        let remaining = remaining
            .map_err(|e| warn!(wallet = %wallet, error = %e, "Token balance lookup failed"))
            .ok();

        let row = build_row(event, sol_balance, remaining, self.total_supply);
        debug!(wallet = %wallet, status = %row.status, "Wallet enriched");
        row
    }
}

/// Merge a discovered event with its lookups into a classified row.
pub fn build_row(event: &TransferEvent, sol_balance: Option<f64>, remaining: Option<f64>, total_supply: f64) -> WalletRow {
    let token_bought = event.token_bought.unwrap_or(0.0);

    WalletRow {
        wallet: event.wallet.clone(),
        signature: event.signature.clone(),
        sol_balance,
        status: classify(token_bought, remaining),
        token_bought,
        pct_supply_bought: supply_fraction(Some(token_bought), total_supply),
        remaining_tokens: remaining,
        pct_supply_remaining: supply_fraction(remaining, total_supply),
    }
}
