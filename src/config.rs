//! Resolution configuration.
//!
//! [`Config`] carries every well-known address and policy knob the resolver
//! needs. It is immutable and passed into each component at construction —
//! nothing reads ambient or global state.

use std::time::Duration;

use alloy::primitives::{Address, address};

use crate::gateway::RetryConfig;

/// ENS Registry contract address on Ethereum mainnet.
pub const MAINNET_REGISTRY: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

/// Default reverse resolver on Ethereum mainnet, used as a last-resort
/// fallback when a reverse node has no resolver configured in the registry.
pub const MAINNET_DEFAULT_REVERSE_RESOLVER: Address =
    address!("084b1c3c81545d370f3634392de611caabff8148");

/// Configuration for ENS resolution.
///
/// The defaults target Ethereum mainnet with a 10 second request timeout and
/// three call attempts.
#[derive(Debug, Clone)]
pub struct Config {
    /// ENS Registry contract address.
    pub registry: Address,

    /// Reverse resolver queried when the registry has none for a reverse node.
    pub default_reverse_resolver: Address,

    /// Per-request timeout for the bundled HTTP gateway.
    pub timeout: Duration,

    /// Retry behavior for every contract call.
    pub retry: RetryConfig,

    /// When `true`, address lookups use the exact node of the queried name
    /// only, without falling back to the node the resolver was discovered on.
    ///
    /// The default (`false`) lets a wildcard resolver answer for subdomains
    /// that have no address record of their own. Enable this to reject any
    /// inherited address.
    pub exact_address_node: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry: MAINNET_REGISTRY,
            default_reverse_resolver: MAINNET_DEFAULT_REVERSE_RESOLVER,
            timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
            exact_address_node: false,
        }
    }
}

impl Config {
    /// Override the registry contract address.
    #[must_use]
    pub const fn with_registry(mut self, registry: Address) -> Self {
        self.registry = registry;
        self
    }

    /// Override the fallback reverse resolver address.
    #[must_use]
    pub const fn with_default_reverse_resolver(mut self, resolver: Address) -> Self {
        self.default_reverse_resolver = resolver;
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the retry behavior.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Restrict address lookups to the exact node of the queried name.
    #[must_use]
    pub const fn with_exact_address_node(mut self, exact: bool) -> Self {
        self.exact_address_node = exact;
        self
    }
}
