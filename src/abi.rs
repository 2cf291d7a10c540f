//! Minimal ABI codec for the four ENS contract methods.
//!
//! This is intentionally not a general ABI library: only the call shapes the
//! resolver needs are supported, built over bounds-checked byte slices. The
//! selectors are fixed constants for wire compatibility with the deployed
//! Registry and resolver contracts.
//!
//! Decoding never fails. Remote contracts are untrusted, so a truncated or
//! malformed frame degrades to `None` instead of aborting resolution.

use alloy::primitives::{Address, B256, Bytes};

/// Selector of `resolver(bytes32)` on the ENS Registry.
pub const RESOLVER_SELECTOR: [u8; 4] = [0x01, 0x78, 0xb8, 0xbf];

/// Selector of `addr(bytes32)` on a resolver.
pub const ADDR_SELECTOR: [u8; 4] = [0x3b, 0x3b, 0x57, 0xde];

/// Selector of `text(bytes32,string)` on a resolver.
pub const TEXT_SELECTOR: [u8; 4] = [0x59, 0xd1, 0xd4, 0x3c];

/// Selector of `name(bytes32)` on a reverse resolver.
pub const NAME_SELECTOR: [u8; 4] = [0x69, 0x1f, 0x34, 0x31];

const WORD: usize = 32;

fn selector_and_node(selector: [u8; 4], node: B256) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + WORD);
    data.extend_from_slice(&selector);
    data.extend_from_slice(node.as_slice());
    data
}

/// Encode a `resolver(bytes32)` call against the registry.
#[must_use]
pub fn encode_resolver_call(node: B256) -> Bytes {
    selector_and_node(RESOLVER_SELECTOR, node).into()
}

/// Encode an `addr(bytes32)` call against a resolver.
#[must_use]
pub fn encode_addr_call(node: B256) -> Bytes {
    selector_and_node(ADDR_SELECTOR, node).into()
}

/// Encode a `name(bytes32)` call against a reverse resolver.
#[must_use]
pub fn encode_name_call(node: B256) -> Bytes {
    selector_and_node(NAME_SELECTOR, node).into()
}

/// Encode a `text(bytes32,string)` call against a resolver.
///
/// The key is framed as a dynamic string: a 32-byte offset word (always
/// `0x40`, the head size of the two parameters), a 32-byte length word, and
/// the UTF-8 bytes right-padded to a word boundary.
#[must_use]
pub fn encode_text_call(node: B256, key: &str) -> Bytes {
    let key_bytes = key.as_bytes();
    let padded_len = key_bytes.len().div_ceil(WORD) * WORD;

    let mut data = selector_and_node(TEXT_SELECTOR, node);
    data.reserve(2 * WORD + padded_len);

    let mut offset = [0u8; WORD];
    offset[WORD - 1] = 0x40;
    data.extend_from_slice(&offset);

    let mut length = [0u8; WORD];
    length[WORD - 8..].copy_from_slice(&(key_bytes.len() as u64).to_be_bytes());
    data.extend_from_slice(&length);

    data.extend_from_slice(key_bytes);
    data.resize(data.len() + padded_len - key_bytes.len(), 0);
    data.into()
}

/// Decode an address return value.
///
/// Takes the low 20 bytes of the first 32-byte word. The all-zero address is
/// "absent", never a valid value. Frames shorter than one word decode to
/// `None`.
#[must_use]
pub fn decode_address(data: &[u8]) -> Option<Address> {
    let word = data.get(..WORD)?;
    let addr = Address::from_slice(&word[12..]);
    (!addr.is_zero()).then_some(addr)
}

/// Decode a dynamic string return value (offset word, length word, bytes).
///
/// A zero-length string, an offset or length word too large to index the
/// buffer, or any read past the end of the frame all decode to `None`.
#[must_use]
pub fn decode_string(data: &[u8]) -> Option<String> {
    let offset = word_as_usize(data.get(..WORD)?)?;
    let length = word_as_usize(data.get(offset..offset.checked_add(WORD)?)?)?;
    if length == 0 {
        return None;
    }
    let start = offset.checked_add(WORD)?;
    let bytes = data.get(start..start.checked_add(length)?)?;
    Some(String::from_utf8_lossy(bytes).into_owned())
}

/// Interpret a 32-byte big-endian word as `usize`, rejecting values that
/// cannot possibly index a call frame.
fn word_as_usize(word: &[u8]) -> Option<usize> {
    if word.len() != WORD || word[..WORD - 8].iter().any(|b| *b != 0) {
        return None;
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[WORD - 8..]);
    usize::try_from(u64::from_be_bytes(buf)).ok()
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, keccak256};

    use super::*;

    fn node() -> B256 {
        crate::name::namehash("alice.eth")
    }

    #[test]
    fn selectors_match_method_signatures() {
        assert_eq!(RESOLVER_SELECTOR, keccak256(b"resolver(bytes32)")[..4]);
        assert_eq!(ADDR_SELECTOR, keccak256(b"addr(bytes32)")[..4]);
        assert_eq!(TEXT_SELECTOR, keccak256(b"text(bytes32,string)")[..4]);
        assert_eq!(NAME_SELECTOR, keccak256(b"name(bytes32)")[..4]);
    }

    #[test]
    fn node_calls_are_selector_plus_node() {
        let data = encode_resolver_call(node());
        assert_eq!(data.len(), 36);
        assert_eq!(&data[..4], &RESOLVER_SELECTOR);
        assert_eq!(&data[4..], node().as_slice());

        assert_eq!(&encode_addr_call(node())[..4], &ADDR_SELECTOR);
        assert_eq!(&encode_name_call(node())[..4], &NAME_SELECTOR);
    }

    #[test]
    fn text_call_frames_the_key_as_a_dynamic_string() {
        let data = encode_text_call(node(), "avatar");
        // selector + node + offset + length + one padded word of key bytes
        assert_eq!(data.len(), 4 + 32 + 32 + 32 + 32);
        assert_eq!(&data[..4], &TEXT_SELECTOR);
        assert_eq!(&data[4..36], node().as_slice());
        assert_eq!(data[36..68], {
            let mut w = [0u8; 32];
            w[31] = 0x40;
            w
        });
        assert_eq!(data[68..100], {
            let mut w = [0u8; 32];
            w[31] = 6;
            w
        });
        assert_eq!(&data[100..106], b"avatar");
        assert!(data[106..].iter().all(|b| *b == 0));
    }

    #[test]
    fn text_call_pads_to_word_boundary() {
        // 33-byte key needs two data words.
        let key = "a".repeat(33);
        let data = encode_text_call(node(), &key);
        assert_eq!(data.len(), 4 + 32 + 32 + 32 + 64);
    }

    #[test]
    fn decode_address_takes_low_twenty_bytes() {
        let addr = address!("d8da6bf26964af9d7eed9e03e53415d37aa96045");
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(addr.as_slice());
        assert_eq!(decode_address(&word), Some(addr));
    }

    #[test]
    fn decode_address_absent_cases() {
        assert_eq!(decode_address(&[0u8; 32]), None);
        assert_eq!(decode_address(&[0u8; 16]), None);
        assert_eq!(decode_address(&[]), None);
    }

    fn frame_string(s: &str) -> Vec<u8> {
        let bytes = s.as_bytes();
        let mut data = Vec::new();
        let mut offset = [0u8; 32];
        offset[31] = 0x20;
        data.extend_from_slice(&offset);
        let mut length = [0u8; 32];
        length[24..].copy_from_slice(&(bytes.len() as u64).to_be_bytes());
        data.extend_from_slice(&length);
        data.extend_from_slice(bytes);
        data.resize(data.len().div_ceil(32) * 32, 0);
        data
    }

    #[test]
    fn decode_string_round_trips() {
        assert_eq!(
            decode_string(&frame_string("https://alice.example")).as_deref(),
            Some("https://alice.example"),
        );
        assert_eq!(decode_string(&frame_string("ü")).as_deref(), Some("ü"));
    }

    #[test]
    fn decode_string_rejects_empty_and_malformed() {
        assert_eq!(decode_string(&frame_string("")), None);
        assert_eq!(decode_string(&[]), None);
        assert_eq!(decode_string(&[0u8; 32]), None);

        // Length word claims more bytes than the frame holds.
        let mut truncated = frame_string("hello world");
        truncated.truncate(70);
        assert_eq!(decode_string(&truncated), None);

        // Offset points past the buffer.
        let mut bad_offset = frame_string("hello");
        bad_offset[31] = 0xff;
        assert_eq!(decode_string(&bad_offset), None);

        // Offset word with high bits set cannot index anything.
        let mut huge = frame_string("hello");
        huge[0] = 0x01;
        assert_eq!(decode_string(&huge), None);
    }
}
