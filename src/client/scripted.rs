/// In-memory `ChainDataSource` that replays canned provider responses

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::ChainDataSource;
use crate::error::{AnalyzerError, Result};

#[derive(Default)]
pub struct ScriptedSource {
    pages: Vec<Vec<Value>>,
    fail_pages: bool,
    supply: Option<Value>,
    balances: HashMap<String, Value>,
    token_accounts: HashMap<String, Value>,
    yields: HashMap<String, usize>,
    page_calls: AtomicUsize,
    cursors: Mutex<Vec<Option<String>>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages served in call order; calls past the end get an empty page.
    pub fn with_pages(mut self, pages: Vec<Vec<Value>>) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_failing_pages(mut self) -> Self {
        self.fail_pages = true;
        self
    }

    pub fn with_supply(mut self, result: Value) -> Self {
        self.supply = Some(result);
        self
    }

    pub fn with_balance(mut self, wallet: &str, lamports: u64) -> Self {
        self.balances.insert(wallet.to_string(), json!({"context": {"slot": 1}, "value": lamports}));
        self
    }

    pub fn with_token_accounts(self, wallet: &str, ui_amounts: &[f64]) -> Self {
        let accounts: Vec<Value> = ui_amounts
            .iter()
            .map(|amount| {
                json!({
                    "pubkey": format!("ata-{}", wallet),
                    "account": {"data": {"parsed": {"info": {"tokenAmount": {"uiAmount": amount}}}}}
                })
            })
            .collect();
        self.with_token_accounts_raw(wallet, json!({"value": accounts}))
    }

    pub fn with_token_accounts_raw(mut self, wallet: &str, result: Value) -> Self {
        self.token_accounts.insert(wallet.to_string(), result);
        self
    }

    /// Make lookups for `wallet` yield to the scheduler `count` times before
    /// answering, so completion order differs from claim order.
    pub fn with_yields(mut self, wallet: &str, count: usize) -> Self {
        self.yields.insert(wallet.to_string(), count);
        self
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn cursors(&self) -> Vec<Option<String>> {
        self.cursors.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn respond(&self, key: &str, table: &HashMap<String, Value>, method: &str) -> Result<Value> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        // Always yield at least once so sibling requests overlap
        for _ in 0..=self.yields.get(key).copied().unwrap_or(0) {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        table
            .get(key)
            .cloned()
            .ok_or_else(|| AnalyzerError::Provider(format!("RPC error: 500 no scripted {} for {}", method, key)))
    }
}

#[async_trait]
impl ChainDataSource for ScriptedSource {
    async fn call_rpc(&self, method: &str, params: Value) -> Result<Value> {
        let key = params.get(0).and_then(Value::as_str).unwrap_or_default().to_string();
        match method {
            "getTokenSupply" => self
                .supply
                .clone()
                .ok_or_else(|| AnalyzerError::Provider("Invalid param: not a Token mint".to_string())),
            "getBalance" => self.respond(&key, &self.balances, method).await,
            "getTokenAccountsByOwner" => self.respond(&key, &self.token_accounts, method).await,
            other => Err(AnalyzerError::Provider(format!("Method not found: {}", other))),
        }
    }

    async fn fetch_transaction_page(&self, _address: &str, before: Option<&str>) -> Result<Vec<Value>> {
        let call = self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.cursors.lock().unwrap().push(before.map(str::to_string));

        if self.fail_pages {
            return Err(AnalyzerError::Provider("Helius Enhanced error: 401 invalid api key".to_string()));
        }
        Ok(self.pages.get(call).cloned().unwrap_or_default())
    }
}
