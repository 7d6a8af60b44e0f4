//! Deterministic nonce generation ([RFC 6979](https://www.rfc-editor.org/rfc/rfc6979)).
//!
//! The nonce stream is derived with HMAC-SHA256 from the private key and the message digest.
//! Because the group order and the HMAC output are both 256 bits, `bits2int` is the identity
//! and `bits2octets` is a single reduction modulo `N`.

use super::scalar::{Scalar, SCALAR_LENGTH};
use crate::{digest::DIGEST_LENGTH, Error};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::trace;
use zeroize::{Zeroize, ZeroizeOnDrop};

type HmacSha256 = Hmac<Sha256>;

/// Default bound on the number of candidates drawn before giving up.
///
/// A candidate falls outside `[1, N)` with probability below `2^-127`, so this bound is only
/// reachable by a broken HMAC.
pub const RFC6979_MAX_ATTEMPTS: usize = 64;

/// Compute `HMAC-SHA256(key, parts[0] || parts[1] || ...)`.
fn hmac(key: &[u8; 32], parts: &[&[u8]]) -> Result<[u8; 32], Error> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| Error::InvalidNonce)?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac.finalize().into_bytes().into())
}

/// The HMAC-DRBG state (`K`, `V`) of RFC 6979 section 3.2.
///
/// Each call to [NonceGenerator::next_nonce] returns the next in-range candidate. Drawing again
/// after a returned nonce was unusable (for example, it produced `r = 0`) continues the same
/// stream, as required by section 3.4.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct NonceGenerator {
    key: [u8; 32],
    value: [u8; 32],
    started: bool,
}

impl NonceGenerator {
    /// Seed the generator (steps b through g).
    pub fn new(private_key: &Scalar, digest: &[u8; DIGEST_LENGTH]) -> Result<Self, Error> {
        let mut secret = private_key.to_bytes();
        let reduced = Scalar::from_bytes_reduced(digest).to_bytes();
        let generator = Self::seed(&secret, &reduced);
        secret.zeroize();
        generator
    }

    fn seed(secret: &[u8; 32], reduced: &[u8; 32]) -> Result<Self, Error> {
        let mut key = [0x00u8; 32];
        let mut value = [0x01u8; 32];
        key = hmac(&key, &[&value, &[0x00], secret, reduced])?;
        value = hmac(&key, &[&value])?;
        key = hmac(&key, &[&value, &[0x01], secret, reduced])?;
        value = hmac(&key, &[&value])?;
        Ok(Self {
            key,
            value,
            started: false,
        })
    }

    /// Draw the next raw 32-byte candidate (step h), reseeding first if a candidate was
    /// already drawn.
    fn candidate(&mut self) -> Result<[u8; SCALAR_LENGTH], Error> {
        if self.started {
            self.key = hmac(&self.key, &[&self.value, &[0x00]])?;
            self.value = hmac(&self.key, &[&self.value])?;
        }
        self.started = true;
        self.value = hmac(&self.key, &[&self.value])?;
        Ok(self.value)
    }

    /// Return the next candidate in `[1, N)`, drawing at most `attempts` candidates.
    ///
    /// Fails with [Error::InvalidNonce] if every candidate drawn is out of range.
    pub fn next_nonce(&mut self, attempts: usize) -> Result<Scalar, Error> {
        for attempt in 0..attempts {
            let mut candidate = self.candidate()?;
            let nonce = Scalar::from_bytes(&candidate);
            candidate.zeroize();
            match nonce {
                Some(nonce) if !nonce.is_zero() => return Ok(nonce),
                _ => trace!(attempt, "rejected out-of-range nonce candidate"),
            }
        }
        Err(Error::InvalidNonce)
    }
}

/// Derive the RFC 6979 nonce for `private_key` (at most 32 bytes, in `[1, N)`) and `digest`.
pub fn generate(
    private_key: &[u8],
    digest: &[u8; DIGEST_LENGTH],
) -> Result<[u8; SCALAR_LENGTH], Error> {
    generate_with_attempts(private_key, digest, RFC6979_MAX_ATTEMPTS)
}

/// Like [generate], but bounded by `attempts` candidates instead of [RFC6979_MAX_ATTEMPTS].
pub fn generate_with_attempts(
    private_key: &[u8],
    digest: &[u8; DIGEST_LENGTH],
    attempts: usize,
) -> Result<[u8; SCALAR_LENGTH], Error> {
    let private_key = Scalar::from_secret_slice(private_key)?;
    let mut generator = NonceGenerator::new(&private_key, digest)?;
    Ok(generator.next_nonce(attempts)?.to_bytes())
}
