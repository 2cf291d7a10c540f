//! Reverse resolution: address to primary name.

use alloy::primitives::Address;
use tracing::debug;

use crate::abi;
use crate::config::Config;
use crate::error::EnsError;
use crate::gateway::{CallGateway, call_with_retry};
use crate::name::{namehash, normalize};
use crate::registry::Registry;

/// Canonicalize an address for reverse lookup: trimmed, lowercased, no `0x`
/// prefix.
///
/// This is the one place where bad input is a caller error instead of an
/// absence: anything that is not 40 hex characters is rejected.
pub(crate) fn canonical_address(address: &str) -> Result<String, EnsError> {
    let trimmed = address.trim().to_lowercase();
    let stripped = trimmed.strip_prefix("0x").unwrap_or(&trimmed);
    if stripped.len() != 40 || !stripped.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(EnsError::invalid_address(address.trim().to_owned()));
    }
    Ok(stripped.to_owned())
}

/// Resolves an address to its primary name via the `<addr>.addr.reverse`
/// node.
pub(crate) struct ReverseResolver<'a> {
    gateway: &'a dyn CallGateway,
    config: &'a Config,
}

impl<'a> ReverseResolver<'a> {
    pub fn new(gateway: &'a dyn CallGateway, config: &'a Config) -> Self {
        Self { gateway, config }
    }

    /// Reverse-resolve an address to its normalized primary name.
    ///
    /// The resolver located for the reverse node is tried first; the
    /// configured default reverse resolver is the last resort, because many
    /// reverse nodes are never explicitly pointed at a resolver.
    ///
    /// # Errors
    ///
    /// Returns an error only when `address` is not a valid 20-byte hex
    /// address.
    pub async fn lookup(&self, address: &str) -> Result<Option<String>, EnsError> {
        let canonical = canonical_address(address)?;
        let reverse_name = format!("{canonical}.addr.reverse");
        let node = namehash(&reverse_name);

        let registry = Registry {
            gateway: self.gateway,
            config: self.config,
        };
        let mut candidates: Vec<Address> = Vec::with_capacity(2);
        if let Some(binding) = registry.locate(&reverse_name).await {
            candidates.push(binding.resolver);
        }
        if !candidates.contains(&self.config.default_reverse_resolver) {
            candidates.push(self.config.default_reverse_resolver);
        }

        let data = abi::encode_name_call(node);
        for resolver in candidates {
            let Some(result) =
                call_with_retry(self.gateway, resolver, data.clone(), &self.config.retry).await
            else {
                continue;
            };
            if let Some(name) = abi::decode_string(&result)
                && !name.is_empty()
            {
                debug!(resolver = %resolver, name, "reverse record found");
                return Ok(Some(normalize(&name)));
            }
        }
        Ok(None)
    }
}
