/// Helius API client
///
/// Wraps the two Helius surfaces the analyzer needs: the JSON-RPC endpoint
/// for balance and supply queries, and the enhanced transactions REST API
/// for decoded transfer history.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, instrument};

use super::rpc::{JsonRpcRequest, JsonRpcResponse};
use super::ChainDataSource;
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Result};

pub struct HeliusClient {
    /// HTTP client shared by both endpoints
    client: Client,
    /// Endpoints, credential and page size
    config: AnalyzerConfig,
}

impl HeliusClient {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Turn a non-success response into a provider error carrying the body.
    async fn ensure_success(response: Response, label: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AnalyzerError::Provider(format!("{}: {} {}", label, status.as_u16(), body)))
    }
}

#[async_trait]
impl ChainDataSource for HeliusClient {
    #[instrument(skip(self, params))]
    async fn call_rpc(&self, method: &str, params: Value) -> Result<Value> {
        let request = JsonRpcRequest::new(method, params);

        let response = self
            .client
            .post(self.config.rpc_endpoint())
            .query(&[("api-key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let response = Self::ensure_success(response, "RPC error").await?;
        let envelope: JsonRpcResponse = response.json().await?;
        envelope.into_result()
    }

    #[instrument(skip(self))]
    async fn fetch_transaction_page(&self, address: &str, before: Option<&str>) -> Result<Vec<Value>> {
        let page_size = self.config.page_size.to_string();
        let mut query = vec![("api-key", self.config.api_key.as_str()), ("limit", page_size.as_str())];
        if let Some(cursor) = before {
            query.push(("before", cursor));
        }

        let response = self
            .client
            .get(self.config.transactions_endpoint(address))
            .query(&query)
            .send()
            .await?;

        let response = Self::ensure_success(response, "Helius Enhanced error").await?;
        match response.json::<Value>().await? {
            Value::Array(transactions) => Ok(transactions),
            other => {
                debug!(address = %address, body = %other, "Enhanced transactions body is not an array, treating as empty page");
                Ok(Vec::new())
            }
        }
    }
}
