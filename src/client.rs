//! High-level ENS client: the public entry point for resolution.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::EnsError;
use crate::gateway::{CallGateway, http::HttpGateway};
use crate::hydrate::ProfileHydrator;
use crate::name::{namehash, normalize};
use crate::profile::{DEFAULT_RECORDS, Profile};
use crate::records::format_address;
use crate::registry::ResolverBinding;
use crate::reverse::{ReverseResolver, canonical_address};

/// Outcome of one profile resolution.
///
/// Resolution is best-effort: the profile carries everything that could be
/// resolved, and `cause` carries the reason when the input itself was
/// unusable. A profile with only `name` set means the name exists but
/// nothing resolved for it.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The (possibly partially) populated profile.
    pub profile: Profile,
    /// Why resolution could not even start, when applicable.
    pub cause: Option<EnsError>,
}

impl Resolution {
    fn of(profile: Profile) -> Self {
        Self {
            profile,
            cause: None,
        }
    }

    /// Whether any record beyond the input itself was resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.profile.address.is_some() || !self.profile.texts.is_empty()
    }
}

/// ENS resolution client.
///
/// Holds the contract-call gateway and configuration; every resolution call
/// is independent and call-scoped, so one client can serve concurrent
/// lookups without locking.
pub struct EnsClient {
    gateway: Arc<dyn CallGateway>,
    config: Config,
}

impl std::fmt::Debug for EnsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl EnsClient {
    /// Create a client against a JSON-RPC endpoint with default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(rpc_url: &str) -> Result<Self, EnsError> {
        Self::with_config(rpc_url, Config::default())
    }

    /// Create a client against a JSON-RPC endpoint with an explicit
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn with_config(rpc_url: &str, config: Config) -> Result<Self, EnsError> {
        let gateway = HttpGateway::new(rpc_url, config.timeout)?;
        Ok(Self::with_gateway(Arc::new(gateway), config))
    }

    /// Create a client over an injected gateway.
    ///
    /// Use this to supply a custom transport, or a mock in tests.
    #[must_use]
    pub fn with_gateway(gateway: Arc<dyn CallGateway>, config: Config) -> Self {
        Self { gateway, config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve a profile from either a name or an address.
    ///
    /// Input containing a `.` is treated as a name; anything else as an
    /// address, which is reverse-resolved to its primary name first.
    /// `records` limits which text records are fetched; `None` fetches
    /// [`DEFAULT_RECORDS`]. Never fails for ordinary misses — an unusable
    /// input is reported through [`Resolution::cause`].
    pub async fn resolve(&self, address_or_name: &str, records: Option<&[&str]>) -> Resolution {
        let keys: Vec<String> = records
            .unwrap_or(DEFAULT_RECORDS)
            .iter()
            .map(|k| (*k).to_owned())
            .collect();

        if address_or_name.contains('.') {
            return self.resolve_name(address_or_name, &keys).await;
        }

        // Addresses never contain dots; names always do.
        let mut profile = Profile::default();
        let canonical = match canonical_address(address_or_name) {
            Ok(canonical) => canonical,
            Err(e) => {
                warn!(input = address_or_name, error = %e, "unresolvable input");
                return Resolution {
                    profile,
                    cause: Some(e),
                };
            }
        };
        profile.address = Some(format!("0x{canonical}"));

        let reverse = ReverseResolver::new(self.gateway.as_ref(), &self.config);
        match reverse.lookup(&canonical).await {
            Ok(Some(name)) => {
                profile.name = Some(name.clone());
                let hydrator = ProfileHydrator::new(self.gateway.as_ref(), &self.config);
                hydrator.hydrate(&name, &keys, &mut profile).await;
            }
            Ok(None) => debug!(address = %address_or_name, "no primary name"),
            // Canonicalization already succeeded; nothing else errors.
            Err(e) => warn!(error = %e, "reverse lookup failed"),
        }
        Resolution::of(profile)
    }

    /// Resolve a profile for an ENS name.
    ///
    /// `records` limits which text records are fetched; `None` fetches
    /// [`DEFAULT_RECORDS`].
    pub async fn resolve_profile(&self, name: &str, records: Option<&[&str]>) -> Resolution {
        let keys: Vec<String> = records
            .unwrap_or(DEFAULT_RECORDS)
            .iter()
            .map(|k| (*k).to_owned())
            .collect();
        self.resolve_name(name, &keys).await
    }

    async fn resolve_name(&self, name: &str, keys: &[String]) -> Resolution {
        let normalized = normalize(name);
        let mut profile = Profile {
            name: Some(normalized.clone()),
            ..Profile::default()
        };
        let hydrator = ProfileHydrator::new(self.gateway.as_ref(), &self.config);
        hydrator.hydrate(&normalized, keys, &mut profile).await;
        Resolution::of(profile)
    }

    /// Reverse-resolve an address to its normalized primary name.
    ///
    /// # Errors
    ///
    /// Returns an error only when `address` is not a valid 20-byte hex
    /// address; a missing reverse record is `Ok(None)`.
    pub async fn reverse_lookup(&self, address: &str) -> Result<Option<String>, EnsError> {
        ReverseResolver::new(self.gateway.as_ref(), &self.config)
            .lookup(address)
            .await
    }

    /// Locate the resolver governing a name.
    ///
    /// Walks up the label hierarchy until the registry reports a resolver.
    /// The returned binding carries the node the resolver was found on, which
    /// belongs to an ancestor when the name inherits its resolver.
    pub async fn resolve_resolver(&self, name: &str) -> Option<ResolverBinding> {
        let normalized = normalize(name);
        let hydrator = ProfileHydrator::new(self.gateway.as_ref(), &self.config);
        hydrator.registry().locate(&normalized).await
    }

    /// Resolve the ETH address for a name, as lowercase `0x` hex.
    pub async fn resolve_address(&self, name: &str) -> Option<String> {
        let normalized = normalize(name);
        let hydrator = ProfileHydrator::new(self.gateway.as_ref(), &self.config);
        let binding = hydrator.registry().locate(&normalized).await?;
        let address = hydrator
            .lookup_address(&binding, namehash(&normalized))
            .await?;
        Some(format_address(address))
    }

    /// Resolve a single text record for a name.
    ///
    /// Uses the same node preference as profile hydration: the name's exact
    /// node first, then the node the resolver was discovered on.
    pub async fn resolve_text(&self, name: &str, key: &str) -> Option<String> {
        let normalized = normalize(name);
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        let hydrator = ProfileHydrator::new(self.gateway.as_ref(), &self.config);
        let binding = hydrator.registry().locate(&normalized).await?;
        hydrator
            .text_with_fallback(&binding, namehash(&normalized), &key)
            .await
    }

    /// Resolve the avatar for a name, with the single-level parent fallback.
    pub async fn resolve_avatar(&self, name: &str) -> Option<String> {
        let normalized = normalize(name);
        let hydrator = ProfileHydrator::new(self.gateway.as_ref(), &self.config);
        let binding = hydrator.registry().locate(&normalized).await?;
        hydrator
            .lookup_avatar(&normalized, &binding, namehash(&normalized))
            .await
    }
}
