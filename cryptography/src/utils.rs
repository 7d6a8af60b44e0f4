//! Utility functions for cryptographic primitives.

use prost::{encode_length_delimiter, length_delimiter_len};

/// Converts bytes to a lowercase hexadecimal string.
pub fn hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes.iter() {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Converts a hexadecimal string to bytes.
pub fn from_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

/// Converts a hexadecimal string to bytes, stripping whitespace and/or a `0x` prefix. Commonly used
/// in testing to encode external test vectors without modification.
pub fn from_hex_formatted(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.replace(['\t', '\n', '\r', ' '], "");
    let res = hex.strip_prefix("0x").unwrap_or(&hex);
    from_hex(res)
}

/// Computes the union of the namespace and message, prefixed by the length of the namespace.
///
/// The length prefix ensures that two different (namespace, message) pairs can never produce
/// the same payload (i.e. `("ab", "c")` and `("a", "bc")` are distinct).
pub fn union_unique(namespace: &[u8], msg: &[u8]) -> Vec<u8> {
    let ld_len = length_delimiter_len(namespace.len());
    let mut result = Vec::with_capacity(ld_len + namespace.len() + msg.len());
    encode_length_delimiter(namespace.len(), &mut result)
        .expect("a Vec always has room for the length delimiter");
    result.extend_from_slice(namespace);
    result.extend_from_slice(msg);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        // Test case 0: empty bytes
        assert_eq!(hex(&[]), "");

        // Test case 1: single byte
        assert_eq!(hex(&[0x01]), "01");

        // Test case 2: multiple bytes
        assert_eq!(hex(&[0x01, 0x02, 0x03]), "010203");
        assert_eq!(hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(from_hex(""), Some(vec![]));
        assert_eq!(from_hex("010203"), Some(vec![0x01, 0x02, 0x03]));
        assert_eq!(from_hex("DEADbeef"), Some(vec![0xde, 0xad, 0xbe, 0xef]));

        // Odd length
        assert_eq!(from_hex("0"), None);

        // Invalid characters
        assert_eq!(from_hex("zz"), None);
        assert_eq!(from_hex("é1"), None);
    }

    #[test]
    fn test_from_hex_formatted() {
        assert_eq!(from_hex_formatted("0x0102"), Some(vec![0x01, 0x02]));
        assert_eq!(
            from_hex_formatted(
                "01 02
                03\t04"
            ),
            Some(vec![0x01, 0x02, 0x03, 0x04])
        );
        assert_eq!(from_hex_formatted("0x0"), None);
    }

    #[test]
    fn test_union_unique() {
        let namespace = b"namespace";
        let msg = b"message";

        let mut expected = vec![namespace.len() as u8];
        expected.extend_from_slice(namespace);
        expected.extend_from_slice(msg);
        assert_eq!(union_unique(namespace, msg), expected);

        // Shifting bytes between namespace and message must change the payload
        assert_ne!(union_unique(b"ab", b"c"), union_unique(b"a", b"bc"));
    }

    #[test]
    fn test_union_unique_long_namespace() {
        let namespace = vec![7u8; 300];
        let payload = union_unique(&namespace, b"m");

        // 300 = 0b10_0101100 encodes as [0xac, 0x02]
        assert_eq!(&payload[..2], &[0xac, 0x02]);
        assert_eq!(length_delimiter_len(300), 2);
        assert_eq!(payload.len(), 2 + 300 + 1);
        assert_eq!(payload.last(), Some(&b'm'));
    }
}
