//! Record-hydration policy: which node, which key, in what order.

use std::collections::BTreeSet;

use alloy::primitives::{Address, B256};
use tracing::debug;

use crate::config::Config;
use crate::gateway::CallGateway;
use crate::name::namehash;
use crate::profile::{ALIASED_PAIRS, Profile, ProfileField};
use crate::records::{RecordReader, format_address};
use crate::registry::{Registry, ResolverBinding};

/// Fills a [`Profile`] with the address and requested text records for one
/// normalized name, applying key aliasing and the avatar parent fallback.
pub(crate) struct ProfileHydrator<'a> {
    registry: Registry<'a>,
    reader: RecordReader<'a>,
    config: &'a Config,
}

impl<'a> ProfileHydrator<'a> {
    pub fn new(gateway: &'a dyn CallGateway, config: &'a Config) -> Self {
        Self {
            registry: Registry { gateway, config },
            reader: RecordReader { gateway, config },
            config,
        }
    }

    /// Hydrate `profile` with the requested records for `name`.
    ///
    /// Every miss is absorbed; the profile is populated as far as the chain
    /// data allows and returned as-is.
    pub async fn hydrate(&self, name: &str, requested_keys: &[String], profile: &mut Profile) {
        let Some(binding) = self.registry.locate(name).await else {
            debug!(name, "no resolver anywhere in the hierarchy");
            return;
        };
        let query_node = namehash(name);

        if let Some(address) = self.lookup_address(&binding, query_node).await {
            profile.address = Some(format_address(address));
        }

        // Case-insensitive de-duplicated request set; the as-requested set
        // decides which alias keys appear in the output.
        let requested: BTreeSet<String> = requested_keys
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        let mut remaining = requested.clone();

        if remaining.remove("avatar")
            && let Some(avatar) = self.lookup_avatar(name, &binding, query_node).await
        {
            profile.texts.insert("avatar".to_owned(), avatar.clone());
            profile.avatar = Some(avatar);
        }

        for (namespaced, legacy, field) in ALIASED_PAIRS {
            let wanted = remaining.remove(*namespaced) | remaining.remove(*legacy);
            if !wanted {
                continue;
            }
            let mut value = self.text_with_fallback(&binding, query_node, namespaced).await;
            if value.is_none() {
                value = self.text_with_fallback(&binding, query_node, legacy).await;
            }
            if let Some(value) = value {
                for alias in [namespaced, legacy] {
                    if requested.contains(*alias) {
                        profile.texts.insert((*alias).to_owned(), value.clone());
                    }
                }
                profile.set_field(*field, &value);
            }
        }

        for key in &remaining {
            if let Some(value) = self.text_with_fallback(&binding, query_node, key).await {
                if let Some(field) = ProfileField::for_key(key) {
                    profile.set_field(field, &value);
                }
                profile.texts.insert(key.clone(), value);
            }
        }
    }

    /// Address policy: exact query node first; the binding's node only when
    /// it differs and the configuration allows inherited addresses.
    pub async fn lookup_address(
        &self,
        binding: &ResolverBinding,
        query_node: B256,
    ) -> Option<Address> {
        if let Some(address) = self.reader.address(binding.resolver, query_node).await {
            return Some(address);
        }
        if !self.config.exact_address_node && binding.node != query_node {
            return self.reader.address(binding.resolver, binding.node).await;
        }
        None
    }

    /// Avatar policy: the query node under its governing resolver, then
    /// exactly one label up — the parent's own resolver at the parent's node.
    ///
    /// The ascent stops at the immediate parent so a subdomain never picks up
    /// an unrelated avatar from deeper ancestry.
    pub async fn lookup_avatar(
        &self,
        name: &str,
        binding: &ResolverBinding,
        query_node: B256,
    ) -> Option<String> {
        if let Some(avatar) = self.reader.text(binding.resolver, query_node, "avatar").await {
            return Some(avatar);
        }
        let (_, parent) = name.split_once('.')?;
        if parent.is_empty() {
            return None;
        }
        let parent_node = namehash(parent);
        let parent_resolver = self.registry.resolver_at(parent_node).await?;
        self.reader.text(parent_resolver, parent_node, "avatar").await
    }

    /// Text lookup in the standard node order: query node, then the binding's
    /// node when it differs.
    pub async fn text_with_fallback(
        &self,
        binding: &ResolverBinding,
        query_node: B256,
        key: &str,
    ) -> Option<String> {
        if let Some(value) = self.reader.text(binding.resolver, query_node, key).await {
            return Some(value);
        }
        if binding.node != query_node {
            return self.reader.text(binding.resolver, binding.node, key).await;
        }
        None
    }

    pub fn registry(&self) -> &Registry<'a> {
        &self.registry
    }
}
