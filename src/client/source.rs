/// Provider seam for the analysis pipeline
///
/// `ChainDataSource` exposes the two raw provider operations. The typed
/// queries the pipeline needs are provided methods layered on `call_rpc`,
/// so any implementation (the Helius client, a scripted test source) gets
/// them for free.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::Result;
use crate::util::{coerce_number, resolve_supply_amount};

pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

#[async_trait]
pub trait ChainDataSource: Send + Sync {
    /// Issue a JSON-RPC call and return its `result`.
    async fn call_rpc(&self, method: &str, params: Value) -> Result<Value>;

    /// Fetch one page of enhanced transactions for `address`, newest first,
    /// starting strictly before the `before` signature when given.
    async fn fetch_transaction_page(&self, address: &str, before: Option<&str>) -> Result<Vec<Value>>;

    /// Circulating supply of `mint` in UI units.
    async fn get_token_supply(&self, mint: &str) -> Result<f64> {
        let result = self.call_rpc("getTokenSupply", json!([mint])).await?;
        Ok(resolve_supply_amount(&result))
    }

    /// Native balance of `wallet` in SOL.
    async fn get_sol_balance(&self, wallet: &str) -> Result<f64> {
        let result = self
            .call_rpc("getBalance", json!([wallet, {"commitment": "confirmed"}]))
            .await?;
        let lamports = result.get("value").and_then(coerce_number).unwrap_or(0.0);
        Ok(lamports / LAMPORTS_PER_SOL)
    }

    /// Sum of `mint` balances across every token account owned by `owner`.
    async fn get_token_balance_for_owner(&self, owner: &str, mint: &str) -> Result<f64> {
        let result = self
            .call_rpc(
                "getTokenAccountsByOwner",
                json!([owner, {"mint": mint}, {"encoding": "jsonParsed", "commitment": "confirmed"}]),
            )
            .await?;

        let accounts = result.get("value").and_then(Value::as_array);
        let total: f64 = accounts
            .into_iter()
            .flatten()
            .filter_map(|account| {
                account
                    .pointer("/account/data/parsed/info/tokenAmount/uiAmount")
                    .and_then(coerce_number)
            })
            .sum();
        Ok(total)
    }
}
