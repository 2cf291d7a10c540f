//! Record reads against a resolver contract.

use alloy::primitives::{Address, B256, hex};

use crate::abi;
use crate::config::Config;
use crate::gateway::{CallGateway, call_with_retry};

/// Render an address the way callers see it: lowercase hex, `0x` prefix.
pub(crate) fn format_address(address: Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

/// Fetches individual records (ETH address, text) from a resolver.
pub(crate) struct RecordReader<'a> {
    pub gateway: &'a dyn CallGateway,
    pub config: &'a Config,
}

impl RecordReader<'_> {
    /// Fetch the ETH address record for a node. All-zero means absent.
    pub async fn address(&self, resolver: Address, node: B256) -> Option<Address> {
        let data = abi::encode_addr_call(node);
        let result = call_with_retry(self.gateway, resolver, data, &self.config.retry).await?;
        abi::decode_address(&result)
    }

    /// Fetch a text record by key. An empty decoded string is absent, never
    /// an empty-string success.
    pub async fn text(&self, resolver: Address, node: B256, key: &str) -> Option<String> {
        let data = abi::encode_text_call(node, key);
        let result = call_with_retry(self.gateway, resolver, data, &self.config.retry).await?;
        abi::decode_string(&result).filter(|value| !value.is_empty())
    }
}
