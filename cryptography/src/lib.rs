//! Sign messages and verify compact 64-byte ECDSA signatures over secp256k1.
//!
//! Signatures are produced deterministically (nonces are derived as specified in
//! [RFC 6979](https://datatracker.ietf.org/doc/html/rfc6979)) and can be normalized to
//! the low-S form required by [BIP 62](https://github.com/bitcoin/bips/blob/master/bip-0062.mediawiki#low-s-values-in-signatures).
//! Messages are hashed by a pluggable [Hasher] before they are signed.
//!
//! # Example
//! ```rust
//! use secp256k1_compact::{secp256k1::{PrivateKey, Signature}, Sha256};
//!
//! let private_key = PrivateKey::from_seed(0);
//! let public_key = private_key.public_key();
//!
//! // Sign with a deterministic nonce
//! let signature = Signature::sign::<Sha256>(b"hello, world!", private_key.as_ref()).unwrap();
//!
//! // Both the raw and the normalized form verify
//! assert!(signature.verify::<Sha256>(b"hello, world!", &public_key.x(), &public_key.y()));
//! let normalized = signature.normalize_s();
//! assert!(normalized.verify::<Sha256>(b"hello, world!", &public_key.x(), &public_key.y()));
//! ```

use thiserror::Error;

pub mod digest;
pub use digest::Digest;
pub mod secp256k1;
pub mod sha256;
pub use sha256::{hash, DoubleSha256, Sha256};
#[cfg(feature = "keccak")]
pub mod keccak256;
#[cfg(feature = "keccak")]
pub use keccak256::Keccak256;
pub mod message;
#[cfg(feature = "keccak")]
pub use message::EthereumMessage;
pub use message::BitcoinMessage;
pub mod utils;

/// Errors that can occur when signing, verifying, or performing curve arithmetic.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid secret key")]
    InvalidSecretKey,
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid nonce")]
    InvalidNonce,
    #[error("arithmetic overflow: operand is {0} bytes")]
    ArithmeticOverflow(usize),
    #[error("invalid digest length")]
    InvalidDigestLength,
}

/// Interface used to turn a message into the [Digest] that is signed.
///
/// Signing and verification never depend on a particular hash function. Any
/// function producing a 32-byte digest (SHA-256, double SHA-256, Keccak-256, or a
/// message-prefix scheme built on top of one of them) can be plugged in.
///
/// This trait is required to implement the `Clone` trait because it is often
/// part of a struct that is cloned. In practice, implementations do not actually
/// clone the hasher state but users should not rely on this behavior and call `reset`
/// after cloning.
pub trait Hasher: Clone + Send + Sync + 'static {
    /// Create a new hasher.
    fn new() -> Self;

    /// Append message to previously recorded data.
    fn update(&mut self, message: &[u8]);

    /// Hash all recorded data and reset the hasher
    /// to the initial state.
    fn finalize(&mut self) -> Digest;

    /// Reset the hasher without generating a hash.
    ///
    /// This function does not need to be called after `finalize`.
    fn reset(&mut self);

    /// Hash a single message with a fresh hasher.
    fn hash(message: &[u8]) -> Digest {
        let mut hasher = Self::new();
        hasher.update(message);
        hasher.finalize()
    }

    /// Return result of hashing nothing.
    fn empty() -> Digest {
        Self::new().finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{digest::DIGEST_LENGTH, secp256k1::PrivateKey};

    fn test_sign_and_verify<H: Hasher>() {
        let private_key = PrivateKey::from_seed(0);
        let namespace = Some(&b"test_namespace"[..]);
        let message = b"test_message";
        let signature = private_key.sign::<H>(namespace, message).unwrap();
        let public_key = private_key.public_key();
        assert!(public_key.verify::<H>(namespace, message, &signature));
    }

    fn test_sign_and_verify_wrong_message<H: Hasher>() {
        let private_key = PrivateKey::from_seed(0);
        let namespace: Option<&[u8]> = Some(&b"test_namespace"[..]);
        let message = b"test_message";
        let wrong_message = b"wrong_message";
        let signature = private_key.sign::<H>(namespace, message).unwrap();
        let public_key = private_key.public_key();
        assert!(!public_key.verify::<H>(namespace, wrong_message, &signature));
    }

    fn test_sign_and_verify_wrong_namespace<H: Hasher>() {
        let private_key = PrivateKey::from_seed(0);
        let namespace = Some(&b"test_namespace"[..]);
        let wrong_namespace = Some(&b"wrong_namespace"[..]);
        let message = b"test_message";
        let signature = private_key.sign::<H>(namespace, message).unwrap();
        let public_key = private_key.public_key();
        assert!(!public_key.verify::<H>(wrong_namespace, message, &signature));
    }

    fn test_empty_vs_none_namespace<H: Hasher>() {
        let private_key = PrivateKey::from_seed(0);
        let empty_namespace = Some(&b""[..]);
        let message = b"test_message";
        let signature = private_key.sign::<H>(empty_namespace, message).unwrap();
        let public_key = private_key.public_key();
        assert!(public_key.verify::<H>(empty_namespace, message, &signature));
        assert!(!public_key.verify::<H>(None, message, &signature));
    }

    fn test_signature_determinism<H: Hasher>() {
        let private_key_1 = PrivateKey::from_seed(0);
        let private_key_2 = PrivateKey::from_seed(0);
        let namespace = Some(&b"test_namespace"[..]);
        let message = b"test_message";
        let signature_1 = private_key_1.sign::<H>(namespace, message).unwrap();
        let signature_2 = private_key_2.sign::<H>(namespace, message).unwrap();
        assert_eq!(private_key_1.public_key(), private_key_2.public_key());
        assert_eq!(signature_1, signature_2);
    }

    fn test_invalid_signature_publickey_pair<H: Hasher>() {
        let private_key = PrivateKey::from_seed(0);
        let private_key_2 = PrivateKey::from_seed(1);
        let namespace = Some(&b"test_namespace"[..]);
        let message = b"test_message";
        let signature = private_key.sign::<H>(namespace, message).unwrap();
        let public_key = private_key_2.public_key();
        assert!(!public_key.verify::<H>(namespace, message, &signature));
    }

    fn test_hasher_multiple_runs<H: Hasher>() {
        // Generate initial hash
        let mut hasher = H::new();
        hasher.update(b"hello world");
        let digest = hasher.finalize();
        assert!(Digest::try_from(digest.as_ref()).is_ok());
        assert_eq!(digest.as_ref().len(), DIGEST_LENGTH);

        // Reuse hasher without reset
        hasher.update(b"hello world");
        let digest_again = hasher.finalize();
        assert_eq!(digest, digest_again);

        // Reuse hasher with reset
        hasher.update(b"hello mars");
        hasher.reset();
        hasher.update(b"hello world");
        let digest_reset = hasher.finalize();
        assert_eq!(digest, digest_reset);

        // Hash different data
        hasher.update(b"hello mars");
        let digest_mars = hasher.finalize();
        assert_ne!(digest, digest_mars);

        // One-shot helper agrees with the streaming interface
        assert_eq!(H::hash(b"hello world"), digest);
    }

    fn test_hasher_multiple_updates<H: Hasher>() {
        // Generate initial hash
        let mut hasher = H::new();
        hasher.update(b"hello");
        hasher.update(b" world");
        let digest = hasher.finalize();

        // Generate hash in oneshot
        let mut hasher = H::new();
        hasher.update(b"hello world");
        let digest_oneshot = hasher.finalize();
        assert_eq!(digest, digest_oneshot);
    }

    fn test_hasher_empty_input<H: Hasher>() {
        let mut hasher = H::new();
        let digest = hasher.finalize();
        assert_eq!(digest, H::empty());
    }

    fn test_hasher_large_input<H: Hasher>() {
        let mut hasher = H::new();
        let data = vec![1; 1024];
        hasher.update(&data);
        let digest = hasher.finalize();
        assert_ne!(digest, H::empty());
    }

    fn test_hasher_clone_is_fresh<H: Hasher>() {
        let mut hasher = H::new();
        hasher.update(b"hello world");
        let mut cloned = hasher.clone();
        assert_eq!(cloned.finalize(), H::empty());
    }

    #[test]
    fn test_sha256_sign_and_verify() {
        test_sign_and_verify::<Sha256>();
    }

    #[test]
    fn test_sha256_sign_and_verify_wrong_message() {
        test_sign_and_verify_wrong_message::<Sha256>();
    }

    #[test]
    fn test_sha256_sign_and_verify_wrong_namespace() {
        test_sign_and_verify_wrong_namespace::<Sha256>();
    }

    #[test]
    fn test_sha256_empty_vs_none_namespace() {
        test_empty_vs_none_namespace::<Sha256>();
    }

    #[test]
    fn test_sha256_signature_determinism() {
        test_signature_determinism::<Sha256>();
    }

    #[test]
    fn test_sha256_invalid_signature_publickey_pair() {
        test_invalid_signature_publickey_pair::<Sha256>();
    }

    #[test]
    fn test_double_sha256_sign_and_verify() {
        test_sign_and_verify::<DoubleSha256>();
        test_sign_and_verify_wrong_message::<DoubleSha256>();
        test_signature_determinism::<DoubleSha256>();
    }

    #[test]
    fn test_bitcoin_message_sign_and_verify() {
        test_sign_and_verify::<BitcoinMessage>();
        test_sign_and_verify_wrong_message::<BitcoinMessage>();
        test_invalid_signature_publickey_pair::<BitcoinMessage>();
    }

    #[cfg(feature = "keccak")]
    #[test]
    fn test_keccak256_sign_and_verify() {
        test_sign_and_verify::<Keccak256>();
        test_sign_and_verify_wrong_message::<Keccak256>();
        test_sign_and_verify_wrong_namespace::<Keccak256>();
    }

    #[cfg(feature = "keccak")]
    #[test]
    fn test_ethereum_message_sign_and_verify() {
        test_sign_and_verify::<EthereumMessage>();
        test_empty_vs_none_namespace::<EthereumMessage>();
        test_signature_determinism::<EthereumMessage>();
    }

    #[test]
    fn test_signatures_differ_across_hashers() {
        let private_key = PrivateKey::from_seed(0);
        let message = b"test_message";
        let sha = private_key.sign::<Sha256>(None, message).unwrap();
        let double = private_key.sign::<DoubleSha256>(None, message).unwrap();
        assert_ne!(sha, double);

        // A signature over one digest does not verify under another
        let public_key = private_key.public_key();
        assert!(!public_key.verify::<DoubleSha256>(None, message, &sha));
    }

    #[test]
    fn test_sha256_hasher() {
        test_hasher_multiple_runs::<Sha256>();
        test_hasher_multiple_updates::<Sha256>();
        test_hasher_empty_input::<Sha256>();
        test_hasher_large_input::<Sha256>();
        test_hasher_clone_is_fresh::<Sha256>();
    }

    #[test]
    fn test_double_sha256_hasher() {
        test_hasher_multiple_runs::<DoubleSha256>();
        test_hasher_multiple_updates::<DoubleSha256>();
        test_hasher_empty_input::<DoubleSha256>();
        test_hasher_large_input::<DoubleSha256>();
        test_hasher_clone_is_fresh::<DoubleSha256>();
    }

    #[test]
    fn test_bitcoin_message_hasher() {
        test_hasher_multiple_runs::<BitcoinMessage>();
        test_hasher_multiple_updates::<BitcoinMessage>();
        test_hasher_empty_input::<BitcoinMessage>();
        test_hasher_large_input::<BitcoinMessage>();
        test_hasher_clone_is_fresh::<BitcoinMessage>();
    }

    #[cfg(feature = "keccak")]
    #[test]
    fn test_keccak256_hasher() {
        test_hasher_multiple_runs::<Keccak256>();
        test_hasher_multiple_updates::<Keccak256>();
        test_hasher_empty_input::<Keccak256>();
        test_hasher_large_input::<Keccak256>();
        test_hasher_clone_is_fresh::<Keccak256>();
    }

    #[cfg(feature = "keccak")]
    #[test]
    fn test_ethereum_message_hasher() {
        test_hasher_multiple_runs::<EthereumMessage>();
        test_hasher_multiple_updates::<EthereumMessage>();
        test_hasher_empty_input::<EthereumMessage>();
        test_hasher_large_input::<EthereumMessage>();
        test_hasher_clone_is_fresh::<EthereumMessage>();
    }
}
