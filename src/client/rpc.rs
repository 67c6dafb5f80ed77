/// JSON-RPC 2.0 envelope types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AnalyzerError, Result};

/// JSON-RPC request sent to the Helius RPC endpoint
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        }
    }
}

/// JSON-RPC response. `error` is kept untyped because providers disagree on
/// its shape and the message is optional.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl JsonRpcResponse {
    /// Unwrap the `result`, surfacing an `error` payload as a provider error.
    pub fn into_result(self) -> Result<Value> {
        if let Some(error) = self.error {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(AnalyzerError::Provider(message));
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_envelope() {
        let request = JsonRpcRequest::new("getBalance", json!(["Wallet1", {"commitment": "confirmed"}]));
        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(
            encoded,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "getBalance",
                "params": ["Wallet1", {"commitment": "confirmed"}]
            })
        );
    }

    #[test]
    fn test_result_unwrapped() {
        let response: JsonRpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "result": {"value": 5}})).unwrap();
        assert_eq!(response.into_result().unwrap(), json!({"value": 5}));
    }

    #[test]
    fn test_error_message_taken_from_provider() {
        let response: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32602, "message": "Invalid param: could not find mint"}
        }))
        .unwrap();
        let err = response.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Invalid param: could not find mint");
    }

    #[test]
    fn test_error_without_message_is_serialized() {
        let response: JsonRpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "error": {"code": -32005}})).unwrap();
        let err = response.into_result().unwrap_err();
        assert!(matches!(err, AnalyzerError::Provider(_)));
        assert_eq!(err.to_string(), r#"{"code":-32005}"#);
    }

    #[test]
    fn test_null_error_is_ignored() {
        let response: JsonRpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "result": 7, "error": null})).unwrap();
        assert_eq!(response.into_result().unwrap(), json!(7));
    }
}
