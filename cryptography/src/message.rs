//! Signed-message hashers that prepend a wallet-specific prefix.
//!
//! Wallets sign a prefixed payload instead of the raw message so that a signed message
//! can never be replayed as a transaction. Because the prefix commits to the length of the
//! full message, these hashers buffer every update and only hash on `finalize`.

use crate::{digest::DIGEST_LENGTH, Digest, Hasher};
use sha2::{Digest as _, Sha256 as ISha256};

const BITCOIN_PREFIX: &[u8] = b"\x18Bitcoin Signed Message:\n";

#[cfg(feature = "keccak")]
const ETHEREUM_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Bitcoin `CompactSize` encoding of a length.
fn compact_size(len: usize, buf: &mut Vec<u8>) {
    let len = len as u64;
    match len {
        0..=0xfc => buf.push(len as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(len as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(len as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&len.to_le_bytes());
        }
    }
}

/// Double SHA-256 of `"\x18Bitcoin Signed Message:\n" || CompactSize(len) || message`.
#[derive(Debug, Default)]
pub struct BitcoinMessage {
    message: Vec<u8>,
}

impl Clone for BitcoinMessage {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl Hasher for BitcoinMessage {
    fn new() -> Self {
        Self::default()
    }

    fn update(&mut self, message: &[u8]) {
        self.message.extend_from_slice(message);
    }

    fn finalize(&mut self) -> Digest {
        let mut prefix = Vec::with_capacity(BITCOIN_PREFIX.len() + 9);
        prefix.extend_from_slice(BITCOIN_PREFIX);
        compact_size(self.message.len(), &mut prefix);

        let mut hasher = ISha256::new();
        hasher.update(&prefix);
        hasher.update(&self.message);
        let inner = hasher.finalize();
        let array: [u8; DIGEST_LENGTH] = ISha256::digest(inner).into();
        self.reset();
        Digest::from(array)
    }

    fn reset(&mut self) {
        self.message.clear();
    }
}

/// Keccak-256 of `"\x19Ethereum Signed Message:\n" || decimal(len) || message` (EIP-191).
#[cfg(feature = "keccak")]
#[derive(Debug, Default)]
pub struct EthereumMessage {
    message: Vec<u8>,
}

#[cfg(feature = "keccak")]
impl Clone for EthereumMessage {
    fn clone(&self) -> Self {
        Self::default()
    }
}

#[cfg(feature = "keccak")]
impl Hasher for EthereumMessage {
    fn new() -> Self {
        Self::default()
    }

    fn update(&mut self, message: &[u8]) {
        self.message.extend_from_slice(message);
    }

    fn finalize(&mut self) -> Digest {
        use sha3::Keccak256 as IKeccak256;

        let mut hasher = IKeccak256::new();
        hasher.update(ETHEREUM_PREFIX);
        hasher.update(self.message.len().to_string().as_bytes());
        hasher.update(&self.message);
        let array: [u8; DIGEST_LENGTH] = hasher.finalize().into();
        self.reset();
        Digest::from(array)
    }

    fn reset(&mut self) {
        self.message.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{utils::hex, DoubleSha256};

    #[test]
    fn test_compact_size() {
        let cases: [(usize, &[u8]); 6] = [
            (0, &[0x00]),
            (0xfc, &[0xfc]),
            (0xfd, &[0xfd, 0xfd, 0x00]),
            (0xffff, &[0xfd, 0xff, 0xff]),
            (0x1_0000, &[0xfe, 0x00, 0x00, 0x01, 0x00]),
            (0xffff_ffff, &[0xfe, 0xff, 0xff, 0xff, 0xff]),
        ];
        for (len, expected) in cases {
            let mut buf = Vec::new();
            compact_size(len, &mut buf);
            assert_eq!(buf, expected, "len={len}");
        }
    }

    #[test]
    fn test_bitcoin_message() {
        assert_eq!(
            hex(BitcoinMessage::hash(b"hello").as_ref()),
            "cf0447ec85f0ce7150a257db32ebfcb7523dae17c36dbd1be598779fec0484f4"
        );
    }

    #[test]
    fn test_bitcoin_message_matches_manual_prefix() {
        let message = vec![b'x'; 300];
        let mut payload = BITCOIN_PREFIX.to_vec();
        payload.extend_from_slice(&[0xfd, 0x2c, 0x01]);
        payload.extend_from_slice(&message);
        assert_eq!(BitcoinMessage::hash(&message), DoubleSha256::hash(&payload));
    }

    #[cfg(feature = "keccak")]
    #[test]
    fn test_ethereum_message() {
        assert_eq!(
            hex(EthereumMessage::hash(b"hello").as_ref()),
            "50b2c43fd39106bafbba0da34fc430e1f91e3c96ea2acee2bc34119f92b37750"
        );
    }

    #[cfg(feature = "keccak")]
    #[test]
    fn test_ethereum_message_matches_manual_prefix() {
        use crate::Keccak256;

        let message = vec![0u8; 1234];
        let mut payload = ETHEREUM_PREFIX.to_vec();
        payload.extend_from_slice(b"1234");
        payload.extend_from_slice(&message);
        assert_eq!(EthereumMessage::hash(&message), Keccak256::hash(&payload));
    }
}
