//! Bundled [`CallGateway`] over JSON-RPC `eth_call`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy::primitives::{Address, Bytes, hex};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::CallGateway;
use crate::error::EnsError;

/// JSON-RPC `eth_call` gateway backed by [`reqwest`].
///
/// One round trip per call, always against the `latest` block. Any transport
/// failure, RPC error object, or empty/`"0x"` result is reported as `None`;
/// the retry layer above decides whether to try again.
#[derive(Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    url: Url,
    next_id: AtomicU64,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

impl HttpGateway {
    /// Create a gateway for the given JSON-RPC endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client cannot
    /// be constructed.
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self, EnsError> {
        let url = Url::parse(rpc_url)
            .map_err(|e| EnsError::config(format!("invalid RPC URL '{rpc_url}': {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EnsError::transport(format!("HTTP client construction failed: {e}")))?;
        Ok(Self {
            client,
            url,
            next_id: AtomicU64::new(1),
        })
    }
}

#[async_trait]
impl CallGateway for HttpGateway {
    async fn call(&self, to: Address, data: Bytes) -> Option<Bytes> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "eth_call",
            "params": [
                {
                    "to": format!("0x{}", hex::encode(to.as_slice())),
                    "data": format!("0x{}", hex::encode(&data)),
                },
                "latest",
            ],
        });

        let response = match self.client.post(self.url.clone()).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "eth_call transport failure");
                return None;
            }
        };
        let body: RpcResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                debug!(error = %e, "eth_call returned unparseable body");
                return None;
            }
        };

        if let Some(error) = body.error {
            debug!(code = error.code, message = %error.message, "eth_call RPC error");
            return None;
        }
        let result = body.result?;
        let stripped = result.strip_prefix("0x").unwrap_or(&result);
        if stripped.is_empty() {
            return None;
        }
        match hex::decode(stripped) {
            Ok(bytes) => Some(bytes.into()),
            Err(e) => {
                debug!(error = %e, "eth_call result is not hex");
                None
            }
        }
    }
}
