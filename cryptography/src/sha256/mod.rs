//! SHA-256 implementations of the `Hasher` trait.
//!
//! This implementation uses the `sha2` crate to generate SHA-256 digests. [DoubleSha256]
//! applies SHA-256 twice (the digest Bitcoin signs).
//!
//! # Example
//! ```rust
//! use secp256k1_compact::{Hasher, Sha256};
//!
//! // Create a new SHA-256 hasher
//! let mut hasher = Sha256::new();
//!
//! // Update the hasher with some messages
//! hasher.update(b"hello,");
//! hasher.update(b"world!");
//!
//! // Finalize the hasher to get the digest
//! let digest = hasher.finalize();
//!
//! // Print the digest
//! println!("digest: {:?}", digest);
//! ```

use crate::{digest::DIGEST_LENGTH, Digest, Hasher};
use sha2::{Digest as _, Sha256 as ISha256};

/// Generate a SHA-256 digest from a message.
pub fn hash(message: &[u8]) -> Digest {
    let array: [u8; DIGEST_LENGTH] = ISha256::digest(message).into();
    Digest::from(array)
}

/// SHA-256 hasher.
#[derive(Debug)]
pub struct Sha256 {
    hasher: ISha256,
}

impl Default for Sha256 {
    fn default() -> Self {
        <Self as Hasher>::new()
    }
}

impl Clone for Sha256 {
    fn clone(&self) -> Self {
        // We manually implement `Clone` to avoid cloning the hasher state.
        Self::default()
    }
}

impl Hasher for Sha256 {
    fn new() -> Self {
        Self {
            hasher: ISha256::new(),
        }
    }

    fn update(&mut self, message: &[u8]) {
        self.hasher.update(message);
    }

    fn finalize(&mut self) -> Digest {
        let finalized = self.hasher.finalize_reset();
        let array: [u8; DIGEST_LENGTH] = finalized.into();
        Digest::from(array)
    }

    fn reset(&mut self) {
        self.hasher = ISha256::new();
    }
}

/// Double SHA-256 hasher (`SHA-256(SHA-256(m))`).
#[derive(Debug)]
pub struct DoubleSha256 {
    hasher: ISha256,
}

impl Default for DoubleSha256 {
    fn default() -> Self {
        <Self as Hasher>::new()
    }
}

impl Clone for DoubleSha256 {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl Hasher for DoubleSha256 {
    fn new() -> Self {
        Self {
            hasher: ISha256::new(),
        }
    }

    fn update(&mut self, message: &[u8]) {
        self.hasher.update(message);
    }

    fn finalize(&mut self) -> Digest {
        let inner = self.hasher.finalize_reset();
        let array: [u8; DIGEST_LENGTH] = ISha256::digest(inner).into();
        Digest::from(array)
    }

    fn reset(&mut self) {
        self.hasher = ISha256::new();
    }
}
