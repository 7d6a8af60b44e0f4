//! Arithmetic modulo the secp256k1 group order `N`.
//!
//! [Scalar] is the typed representation. The `*_n` functions expose the same operations over
//! big-endian byte strings of up to 32 bytes (shorter operands are left-padded with zeros) and
//! always return a canonical 32-byte result in `[0, N)`.

use super::limbs::{self, Limbs};
use crate::Error;
use std::fmt::{Debug, Display};

/// Length of an encoded [Scalar] (in bytes).
pub const SCALAR_LENGTH: usize = 32;

/// The group order `N`, big-endian.
pub const ORDER: [u8; SCALAR_LENGTH] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// `floor(N / 2)`, big-endian. Signatures with `s` above this value are "high-S".
pub const HALF_ORDER: [u8; SCALAR_LENGTH] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// An integer modulo `N`, always stored in canonical form (`< N`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scalar(Limbs);

impl Scalar {
    pub const ZERO: Self = Self([0, 0, 0, 0]);
    pub const ONE: Self = Self([1, 0, 0, 0]);

    const MODULUS: Limbs = [
        0xBFD2_5E8C_D036_4141,
        0xBAAE_DCE6_AF48_A03B,
        0xFFFF_FFFF_FFFF_FFFE,
        0xFFFF_FFFF_FFFF_FFFF,
    ];

    const HALF_MODULUS: Limbs = [
        0xDFE9_2F46_681B_20A0,
        0x5D57_6E73_57A4_501D,
        0xFFFF_FFFF_FFFF_FFFF,
        0x7FFF_FFFF_FFFF_FFFF,
    ];

    /// `2^256 mod N`.
    const REDUCTION: [u64; 3] = [0x402D_A173_2FC9_BEBF, 0x4551_2319_50B7_5FC4, 0x1];

    const MODULUS_MINUS_TWO: Limbs = [
        0xBFD2_5E8C_D036_413F,
        0xBAAE_DCE6_AF48_A03B,
        0xFFFF_FFFF_FFFF_FFFE,
        0xFFFF_FFFF_FFFF_FFFF,
    ];

    /// Decode a canonical big-endian encoding, rejecting values `>= N`.
    pub fn from_bytes(bytes: &[u8; SCALAR_LENGTH]) -> Option<Self> {
        let value = limbs::from_be_bytes(bytes);
        if limbs::lt(&value, &Self::MODULUS) == 1 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Decode a big-endian encoding, reducing it modulo `N`.
    pub fn from_bytes_reduced(bytes: &[u8; SCALAR_LENGTH]) -> Self {
        // Any 256-bit value is below 2N, so one conditional subtraction suffices.
        let value = limbs::from_be_bytes(bytes);
        Self(limbs::reduce_once(&value, &Self::MODULUS))
    }

    /// Decode a big-endian operand of at most 32 bytes, reducing it modulo `N`.
    pub fn from_slice_reduced(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self::from_bytes_reduced(&pad(bytes)?))
    }

    /// Decode a secret (private key or nonce) of at most 32 bytes.
    ///
    /// Secrets must lie in `[1, N)`: zero and values `>= N` fail with [Error::InvalidSecretKey].
    pub fn from_secret_slice(bytes: &[u8]) -> Result<Self, Error> {
        let scalar = Self::from_bytes(&pad(bytes)?).ok_or(Error::InvalidSecretKey)?;
        if scalar.is_zero() {
            return Err(Error::InvalidSecretKey);
        }
        Ok(scalar)
    }

    pub fn to_bytes(&self) -> [u8; SCALAR_LENGTH] {
        limbs::to_be_bytes(&self.0)
    }

    pub fn is_zero(&self) -> bool {
        limbs::is_zero(&self.0) == 1
    }

    /// Returns true if the scalar is greater than `N / 2`.
    pub fn is_high(&self) -> bool {
        limbs::lt(&Self::HALF_MODULUS, &self.0) == 1
    }

    pub fn add(&self, other: &Self) -> Self {
        Self(limbs::add_mod(&self.0, &other.0, &Self::MODULUS))
    }

    pub fn mul(&self, other: &Self) -> Self {
        let wide = limbs::mul_wide(&self.0, &other.0);
        Self(limbs::reduce_wide(&wide, &Self::REDUCTION, &Self::MODULUS, 4))
    }

    /// `(N - self) mod N`. Negating zero yields zero.
    pub fn negate(&self) -> Self {
        Self(limbs::sub_mod(&limbs::ZERO, &self.0, &Self::MODULUS))
    }

    /// Multiplicative inverse via Fermat's little theorem (`a^(N-2)`).
    ///
    /// Zero has no inverse and fails with [Error::InvalidSecretKey].
    pub fn invert(&self) -> Result<Self, Error> {
        let mut result = Self::ONE;
        for bit in limbs::bits_msb_first(&Self::MODULUS_MINUS_TWO) {
            result = result.mul(&result);
            let product = result.mul(self);
            result = Self(limbs::select(limbs::mask(bit), &product.0, &result.0));
        }
        if self.is_zero() {
            return Err(Error::InvalidSecretKey);
        }
        Ok(result)
    }

    /// Limbs, for bitwise iteration during scalar multiplication.
    pub(crate) fn limbs(&self) -> &Limbs {
        &self.0
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::utils::hex(&self.to_bytes()))
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::utils::hex(&self.to_bytes()))
    }
}

/// Left-pad a big-endian operand to 32 bytes.
fn pad(bytes: &[u8]) -> Result<[u8; SCALAR_LENGTH], Error> {
    if bytes.len() > SCALAR_LENGTH {
        return Err(Error::ArithmeticOverflow(bytes.len()));
    }
    let mut padded = [0u8; SCALAR_LENGTH];
    padded[SCALAR_LENGTH - bytes.len()..].copy_from_slice(bytes);
    Ok(padded)
}

/// `(a + b) mod N`.
pub fn add_mod_n(a: &[u8], b: &[u8]) -> Result<[u8; SCALAR_LENGTH], Error> {
    let a = Scalar::from_slice_reduced(a)?;
    let b = Scalar::from_slice_reduced(b)?;
    Ok(a.add(&b).to_bytes())
}

/// `(a * b) mod N`.
pub fn mul_mod_n(a: &[u8], b: &[u8]) -> Result<[u8; SCALAR_LENGTH], Error> {
    let a = Scalar::from_slice_reduced(a)?;
    let b = Scalar::from_slice_reduced(b)?;
    Ok(a.mul(&b).to_bytes())
}

/// `a^-1 mod N`. Fails with [Error::InvalidSecretKey] when `a = 0 (mod N)`.
pub fn mod_inv_n(a: &[u8]) -> Result<[u8; SCALAR_LENGTH], Error> {
    Ok(Scalar::from_slice_reduced(a)?.invert()?.to_bytes())
}

/// `(N - a) mod N`.
pub fn negate_n(a: &[u8]) -> Result<[u8; SCALAR_LENGTH], Error> {
    Ok(Scalar::from_slice_reduced(a)?.negate().to_bytes())
}
