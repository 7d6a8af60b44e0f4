//! Compact ECDSA signatures and the keys that produce them.

use super::{
    point::{add_scaled_generator, AffinePoint, COORDINATE_LENGTH},
    rfc6979::{NonceGenerator, RFC6979_MAX_ATTEMPTS},
    scalar::{Scalar, HALF_ORDER, SCALAR_LENGTH},
};
use crate::{
    utils::{hex, union_unique},
    Error, Hasher,
};
use rand::{rngs::StdRng, CryptoRng, Rng, SeedableRng};
use std::{
    borrow::Cow,
    fmt::{Debug, Display},
    ops::Deref,
};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const PRIVATE_KEY_LENGTH: usize = 32;
pub const PUBLIC_KEY_LENGTH: usize = 64; // X || Y
pub const SIGNATURE_LENGTH: usize = 64; // R || S

/// A compact ECDSA signature: `r` (32 bytes, big-endian) followed by `s` (32 bytes, big-endian).
///
/// A signature may be *normalized* (`s <= N / 2`) or not. Both forms verify;
/// [Signature::normalize_s] converts to the normalized form.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Signature {
    raw: [u8; SIGNATURE_LENGTH],
}

impl Signature {
    pub fn from_scalars(r: &[u8; SCALAR_LENGTH], s: &[u8; SCALAR_LENGTH]) -> Self {
        let mut raw = [0u8; SIGNATURE_LENGTH];
        raw[..SCALAR_LENGTH].copy_from_slice(r);
        raw[SCALAR_LENGTH..].copy_from_slice(s);
        Self { raw }
    }

    /// The `r` component.
    pub fn r(&self) -> [u8; SCALAR_LENGTH] {
        let mut r = [0u8; SCALAR_LENGTH];
        r.copy_from_slice(&self.raw[..SCALAR_LENGTH]);
        r
    }

    /// The `s` component.
    pub fn s(&self) -> [u8; SCALAR_LENGTH] {
        let mut s = [0u8; SCALAR_LENGTH];
        s.copy_from_slice(&self.raw[SCALAR_LENGTH..]);
        s
    }

    /// Sign `H(message)` with a nonce derived from the private key and digest (RFC 6979).
    ///
    /// If a nonce yields `r = 0` or `s = 0`, the next nonce in the RFC 6979 stream is used.
    /// The returned signature is not normalized.
    pub fn sign<H: Hasher>(message: &[u8], private_key: &[u8]) -> Result<Self, Error> {
        let private_key = Scalar::from_secret_slice(private_key)?;
        let digest = H::hash(message).to_bytes();
        let mut nonces = NonceGenerator::new(&private_key, &digest)?;
        for attempt in 0..RFC6979_MAX_ATTEMPTS {
            let k = nonces.next_nonce(RFC6979_MAX_ATTEMPTS)?;
            match Self::sign_digest(&digest, &k, &private_key) {
                Err(Error::InvalidNonce) => {
                    debug!(attempt, "nonce produced a degenerate signature");
                }
                result => return result,
            }
        }
        Err(Error::InvalidNonce)
    }

    /// Sign `H(message)` with the caller-supplied nonce `k`.
    ///
    /// `k` and `private_key` must both lie in `[1, N)`, and `k` must not yield `r = 0` or
    /// `s = 0`. Otherwise this fails with [Error::InvalidSecretKey].
    pub fn sign_with_k<H: Hasher>(
        message: &[u8],
        k: &[u8],
        private_key: &[u8],
    ) -> Result<Self, Error> {
        let k = Scalar::from_secret_slice(k)?;
        let private_key = Scalar::from_secret_slice(private_key)?;
        let digest = H::hash(message).to_bytes();
        Self::sign_digest(&digest, &k, &private_key).map_err(|err| match err {
            Error::InvalidNonce => Error::InvalidSecretKey,
            err => err,
        })
    }

    /// `r = (k * G).x mod N`, `s = k^-1 * (e + d * r) mod N`.
    ///
    /// Fails with [Error::InvalidNonce] if `r = 0` or `s = 0`.
    fn sign_digest(
        digest: &[u8; SCALAR_LENGTH],
        k: &Scalar,
        private_key: &Scalar,
    ) -> Result<Self, Error> {
        let e = Scalar::from_bytes_reduced(digest);
        let point = AffinePoint::generator().mul(k);
        let r = Scalar::from_bytes_reduced(&point.x());
        if r.is_zero() {
            return Err(Error::InvalidNonce);
        }
        let s = k.invert()?.mul(&e.add(&private_key.mul(&r)));
        if s.is_zero() {
            return Err(Error::InvalidNonce);
        }
        Ok(Self::from_scalars(&r.to_bytes(), &s.to_bytes()))
    }

    /// Verify this signature over `H(message)` against the public key `(x, y)`.
    ///
    /// Returns `false` for an invalid signature and for any input that cannot be
    /// verified at all (a point off the curve, `r` or `s` outside `[1, N)`).
    pub fn verify<H: Hasher>(&self, message: &[u8], x: &[u8], y: &[u8]) -> bool {
        match self.try_verify::<H>(message, x, y) {
            Ok(valid) => valid,
            Err(err) => {
                debug!(?err, "unable to verify signature");
                false
            }
        }
    }

    fn try_verify<H: Hasher>(&self, message: &[u8], x: &[u8], y: &[u8]) -> Result<bool, Error> {
        let public_key = AffinePoint::from_coordinates(x, y)?;
        let r = Scalar::from_bytes(&self.r()).ok_or(Error::InvalidSignature)?;
        let s = Scalar::from_bytes(&self.s()).ok_or(Error::InvalidSignature)?;
        if r.is_zero() || s.is_zero() {
            return Err(Error::InvalidSignature);
        }
        let s_inv = s.invert()?;
        let e = Scalar::from_bytes_reduced(&H::hash(message).to_bytes());

        // R' = (r / s) * Q + (e / s) * G
        let point = public_key.mul(&r.mul(&s_inv));
        let point = add_scaled_generator(&point, &e.mul(&s_inv).to_bytes())?;
        if point.is_identity() {
            return Ok(false);
        }
        Ok(Scalar::from_bytes_reduced(&point.x()) == r)
    }

    /// Return the equivalent signature with `s <= N / 2` (BIP 62).
    ///
    /// Already-normalized signatures are returned unchanged.
    pub fn normalize_s(&self) -> Self {
        if self.is_normalized() {
            return *self;
        }
        let s = Scalar::from_bytes_reduced(&self.s());
        let s = if s.is_high() { s.negate() } else { s };
        Self::from_scalars(&self.r(), &s.to_bytes())
    }

    /// Returns true if `s <= N / 2` (compared as big-endian bytes).
    pub fn is_normalized(&self) -> bool {
        self.s() <= HALF_ORDER
    }

    /// Byte-wise equality.
    pub fn equals(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Deref for Signature {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.raw
    }
}

impl From<[u8; SIGNATURE_LENGTH]> for Signature {
    fn from(raw: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { raw }
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let raw: [u8; SIGNATURE_LENGTH] =
            value.try_into().map_err(|_| Error::InvalidSignature)?;
        Ok(Self { raw })
    }
}

impl TryFrom<&Vec<u8>> for Signature {
    type Error = Error;
    fn try_from(value: &Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl TryFrom<Vec<u8>> for Signature {
    type Error = Error;
    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

/// Build the signed payload for an optional namespace.
fn payload<'a>(namespace: Option<&[u8]>, message: &'a [u8]) -> Cow<'a, [u8]> {
    match namespace {
        Some(namespace) => Cow::Owned(union_unique(namespace, message)),
        None => Cow::Borrowed(message),
    }
}

/// Secp256k1 Private Key (a scalar in `[1, N)`).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    raw: [u8; PRIVATE_KEY_LENGTH],
}

impl PrivateKey {
    /// Sample a private key uniformly from `[1, N)`.
    pub fn from_rng<R: CryptoRng + Rng>(rng: &mut R) -> Self {
        let mut raw = [0u8; PRIVATE_KEY_LENGTH];
        loop {
            rng.fill(&mut raw[..]);
            if Scalar::from_secret_slice(&raw).is_ok() {
                return Self { raw };
            }
        }
    }

    /// Derive a private key from a seed (not suitable for production use).
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::from_rng(&mut rng)
    }

    pub fn public_key(&self) -> PublicKey {
        // The raw bytes were validated at construction and are already canonical.
        let scalar = Scalar::from_bytes_reduced(&self.raw);
        let point = AffinePoint::generator().mul(&scalar);
        PublicKey::from_point(&point)
    }

    /// Sign `message` (prefixed with `namespace`, if provided) and return the normalized
    /// signature.
    pub fn sign<H: Hasher>(
        &self,
        namespace: Option<&[u8]>,
        message: &[u8],
    ) -> Result<Signature, Error> {
        let payload = payload(namespace, message);
        Ok(Signature::sign::<H>(&payload, &self.raw)?.normalize_s())
    }
}

impl Eq for PrivateKey {}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        let mut diff = 0u8;
        for (a, b) in self.raw.iter().zip(other.raw.iter()) {
            diff |= a ^ b;
        }
        diff == 0
    }
}

impl AsRef<[u8]> for PrivateKey {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let raw: [u8; PRIVATE_KEY_LENGTH] =
            value.try_into().map_err(|_| Error::InvalidSecretKey)?;
        Scalar::from_secret_slice(&raw)?;
        Ok(Self { raw })
    }
}

impl TryFrom<Vec<u8>> for PrivateKey {
    type Error = Error;
    fn try_from(mut value: Vec<u8>) -> Result<Self, Self::Error> {
        let key = Self::try_from(value.as_slice());
        value.zeroize();
        key
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl Display for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

/// Secp256k1 Public Key, encoded as uncompressed affine coordinates `X || Y` (no prefix byte).
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PublicKey {
    raw: [u8; PUBLIC_KEY_LENGTH],
}

impl PublicKey {
    fn from_point(point: &AffinePoint) -> Self {
        let mut raw = [0u8; PUBLIC_KEY_LENGTH];
        raw[..COORDINATE_LENGTH].copy_from_slice(&point.x());
        raw[COORDINATE_LENGTH..].copy_from_slice(&point.y());
        Self { raw }
    }

    /// Build a public key from 32-byte big-endian coordinates, rejecting points off the curve.
    pub fn from_coordinates(x: &[u8], y: &[u8]) -> Result<Self, Error> {
        let point = AffinePoint::from_coordinates(x, y)?;
        Ok(Self::from_point(&point))
    }

    pub fn x(&self) -> [u8; COORDINATE_LENGTH] {
        let mut x = [0u8; COORDINATE_LENGTH];
        x.copy_from_slice(&self.raw[..COORDINATE_LENGTH]);
        x
    }

    pub fn y(&self) -> [u8; COORDINATE_LENGTH] {
        let mut y = [0u8; COORDINATE_LENGTH];
        y.copy_from_slice(&self.raw[COORDINATE_LENGTH..]);
        y
    }

    /// Verify `signature` over `message` (prefixed with `namespace`, if provided).
    ///
    /// Both normalized and non-normalized signatures are accepted.
    pub fn verify<H: Hasher>(
        &self,
        namespace: Option<&[u8]>,
        message: &[u8],
        signature: &Signature,
    ) -> bool {
        let payload = payload(namespace, message);
        signature.verify::<H>(&payload, &self.x(), &self.y())
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl Deref for PublicKey {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.raw
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != PUBLIC_KEY_LENGTH {
            return Err(Error::InvalidPublicKey);
        }
        Self::from_coordinates(&value[..COORDINATE_LENGTH], &value[COORDINATE_LENGTH..])
    }
}

impl TryFrom<&Vec<u8>> for PublicKey {
    type Error = Error;
    fn try_from(value: &Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl TryFrom<Vec<u8>> for PublicKey {
    type Error = Error;
    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.raw))
    }
}
