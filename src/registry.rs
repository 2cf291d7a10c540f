//! Resolver discovery against the ENS Registry.

use alloy::primitives::{Address, B256};
use tracing::debug;

use crate::abi;
use crate::config::Config;
use crate::gateway::{CallGateway, call_with_retry};
use crate::name::namehash;

/// The resolver governing a name, and the node it was discovered on.
///
/// `node` may belong to an ancestor of the queried name when resolution was
/// inherited (wildcard resolution). Record lookups prefer the exact query
/// node and fall back to this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverBinding {
    /// Address of the resolver contract.
    pub resolver: Address,
    /// Node at which the resolver was found.
    pub node: B256,
}

/// Registry queries: single-node resolver lookup and hierarchical discovery.
pub(crate) struct Registry<'a> {
    pub gateway: &'a dyn CallGateway,
    pub config: &'a Config,
}

impl Registry<'_> {
    /// Ask the registry for the resolver at one node.
    pub async fn resolver_at(&self, node: B256) -> Option<Address> {
        let data = abi::encode_resolver_call(node);
        let result = call_with_retry(self.gateway, self.config.registry, data, &self.config.retry)
            .await?;
        abi::decode_address(&result)
    }

    /// Walk up the label hierarchy of a normalized name until the registry
    /// reports a resolver.
    ///
    /// A subdomain with no resolver of its own inherits its nearest
    /// ancestor's. Returns `None` when no level of the hierarchy has one.
    pub async fn locate(&self, normalized_name: &str) -> Option<ResolverBinding> {
        let mut current = normalized_name;
        loop {
            let node = namehash(current);
            if let Some(resolver) = self.resolver_at(node).await {
                debug!(name = current, resolver = %resolver, "resolver located");
                return Some(ResolverBinding { resolver, node });
            }
            match current.split_once('.') {
                Some((_, rest)) if !rest.is_empty() => current = rest,
                _ => return None,
            }
        }
    }
}
