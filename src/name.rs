//! Name normalization and EIP-137 namehashing.
//!
//! Both functions are pure: every component that needs a node derives it
//! through [`namehash`] so the same name always maps to the same node.

use alloy::primitives::{B256, keccak256};

/// Canonicalize a user-supplied domain name.
///
/// Trims surrounding whitespace, strips one trailing `.`, lowercases, and
/// converts to the IDNA ASCII-compatible form when the name needs it. If the
/// IDNA conversion fails the lowercased form is returned unchanged — this
/// function never fails.
#[must_use]
pub fn normalize(name: &str) -> String {
    let trimmed = name.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    let lower = trimmed.to_lowercase();
    if lower.is_empty() {
        return lower;
    }
    match idna::domain_to_ascii(&lower) {
        Ok(ascii) if !ascii.is_empty() => ascii.to_lowercase(),
        _ => lower,
    }
}

/// Compute the EIP-137 namehash of a normalized domain name.
///
/// The empty name hashes to the all-zero node. Otherwise the labels are
/// folded root-first: `node = keccak256(node || keccak256(label))`.
#[must_use]
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }
    for label in name.rsplit('.') {
        let label_hash = keccak256(label.as_bytes());
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(label_hash.as_slice());
        node = keccak256(buf);
    }
    node
}

#[cfg(test)]
mod tests {
    use alloy::primitives::b256;

    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  ExAmple.ETH "), "example.eth");
        assert_eq!(normalize("alice.eth."), "alice.eth");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn normalize_applies_idna() {
        // U+00FC maps to punycode under IDNA.
        assert_eq!(normalize("bücher.eth"), "xn--bcher-kva.eth");
    }

    #[test]
    fn namehash_empty_is_zero() {
        assert_eq!(namehash(""), B256::ZERO);
    }

    #[test]
    fn namehash_matches_eip137_vectors() {
        assert_eq!(
            namehash("eth"),
            b256!("93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae"),
        );
        assert_eq!(
            namehash("foo.eth"),
            b256!("de9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f"),
        );
    }

    #[test]
    fn namehash_is_deterministic() {
        assert_eq!(namehash("sub.alice.eth"), namehash("sub.alice.eth"));
        assert_ne!(namehash("alice.eth"), namehash("bob.eth"));
    }

    #[test]
    fn namehash_folds_labels_root_first() {
        // namehash("foo.eth") == keccak256(namehash("eth") || keccak256("foo"))
        let parent = namehash("eth");
        let label = keccak256(b"foo");
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(parent.as_slice());
        buf[32..].copy_from_slice(label.as_slice());
        assert_eq!(namehash("foo.eth"), keccak256(buf));
    }
}
