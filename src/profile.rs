//! The resolved profile aggregate and its well-known fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Text record keys fetched when the caller does not name any.
///
/// Core EIP-634 keys plus the popular namespaced social keys and their
/// legacy unnamespaced equivalents.
pub const DEFAULT_RECORDS: &[&str] = &[
    "avatar",
    "url",
    "email",
    "description",
    "com.twitter",
    "twitter",
    "com.github",
    "github",
];

/// A resolved ENS profile.
///
/// Created empty at the start of a resolution and populated incrementally;
/// anything that could not be resolved stays `None`. `texts` holds every
/// successfully resolved text record under the key it was requested as,
/// including records that also map to a well-known field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Normalized ENS name.
    pub name: Option<String>,
    /// ETH address, lowercase hex with `0x` prefix.
    pub address: Option<String>,
    /// Avatar URI.
    pub avatar: Option<String>,
    /// Website URL.
    pub url: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Twitter handle.
    pub twitter: Option<String>,
    /// GitHub handle.
    pub github: Option<String>,
    /// Discord handle.
    pub discord: Option<String>,
    /// Reddit handle.
    pub reddit: Option<String>,
    /// Telegram handle.
    pub telegram: Option<String>,
    /// LinkedIn handle.
    pub linkedin: Option<String>,
    /// Every resolved text record, keyed as requested.
    pub texts: BTreeMap<String, String>,
}

impl Profile {
    /// Store a value into the well-known field a record key maps to, if any.
    pub(crate) fn set_field(&mut self, field: ProfileField, value: &str) {
        let slot = match field {
            ProfileField::Avatar => &mut self.avatar,
            ProfileField::Url => &mut self.url,
            ProfileField::Email => &mut self.email,
            ProfileField::Description => &mut self.description,
            ProfileField::Twitter => &mut self.twitter,
            ProfileField::Github => &mut self.github,
            ProfileField::Discord => &mut self.discord,
            ProfileField::Reddit => &mut self.reddit,
            ProfileField::Telegram => &mut self.telegram,
            ProfileField::Linkedin => &mut self.linkedin,
        };
        *slot = Some(value.to_owned());
    }
}

/// Well-known profile fields and the text record keys that feed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    /// `avatar`.
    Avatar,
    /// `url`.
    Url,
    /// `email`.
    Email,
    /// `description`.
    Description,
    /// `com.twitter` or legacy `twitter`.
    Twitter,
    /// `com.github` or legacy `github`.
    Github,
    /// `com.discord`.
    Discord,
    /// `com.reddit`.
    Reddit,
    /// `org.telegram`.
    Telegram,
    /// `com.linkedin`.
    Linkedin,
}

impl ProfileField {
    /// The field a lowercase text record key maps to, if any.
    #[must_use]
    pub fn for_key(key: &str) -> Option<Self> {
        match key {
            "avatar" => Some(Self::Avatar),
            "url" => Some(Self::Url),
            "email" => Some(Self::Email),
            "description" => Some(Self::Description),
            "com.twitter" | "twitter" => Some(Self::Twitter),
            "com.github" | "github" => Some(Self::Github),
            "com.discord" => Some(Self::Discord),
            "com.reddit" => Some(Self::Reddit),
            "org.telegram" => Some(Self::Telegram),
            "com.linkedin" => Some(Self::Linkedin),
            _ => None,
        }
    }
}

/// Key pairs resolved as one logical field: the namespaced key is preferred,
/// the legacy key is the fallback, and a hit satisfies every requested alias.
pub(crate) const ALIASED_PAIRS: &[(&str, &str, ProfileField)] = &[
    ("com.twitter", "twitter", ProfileField::Twitter),
    ("com.github", "github", ProfileField::Github),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_mapping_covers_aliases() {
        assert_eq!(ProfileField::for_key("com.twitter"), Some(ProfileField::Twitter));
        assert_eq!(ProfileField::for_key("twitter"), Some(ProfileField::Twitter));
        assert_eq!(ProfileField::for_key("org.telegram"), Some(ProfileField::Telegram));
        assert_eq!(ProfileField::for_key("header"), None);
    }

    #[test]
    fn set_field_populates_the_right_slot() {
        let mut profile = Profile::default();
        profile.set_field(ProfileField::Twitter, "alice_tw");
        profile.set_field(ProfileField::Url, "https://alice.example");
        assert_eq!(profile.twitter.as_deref(), Some("alice_tw"));
        assert_eq!(profile.url.as_deref(), Some("https://alice.example"));
        assert_eq!(profile.github, None);
    }
}
