//! Keccak-256 implementation of the `Hasher` trait.
//!
//! This is the original Keccak submission (as used by Ethereum), not the padded
//! NIST SHA3-256 variant. Digests are generated with the `sha3` crate.

use crate::{digest::DIGEST_LENGTH, Digest, Hasher};
use sha3::{Digest as _, Keccak256 as IKeccak256};

/// Keccak-256 hasher.
#[derive(Debug)]
pub struct Keccak256 {
    hasher: IKeccak256,
}

impl Default for Keccak256 {
    fn default() -> Self {
        <Self as Hasher>::new()
    }
}

impl Clone for Keccak256 {
    fn clone(&self) -> Self {
        // We manually implement `Clone` to avoid cloning the hasher state.
        Self::default()
    }
}

impl Hasher for Keccak256 {
    fn new() -> Self {
        Self {
            hasher: IKeccak256::new(),
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
        self.hasher = IKeccak256::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::hex;

    #[test]
    fn test_keccak256() {
        assert_eq!(
            hex(Keccak256::empty().as_ref()),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(
            hex(Keccak256::hash(b"hello world").as_ref()),
            "47173285a8d7341e5e972fc677286384f802f8ef42a5ec5f03bbfa254cb01fad"
        );
    }

    #[test]
    fn test_keccak256_is_not_sha3() {
        // NIST SHA3-256("") = a7ffc6f8...
        assert_ne!(
            hex(Keccak256::empty().as_ref()),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }
}
