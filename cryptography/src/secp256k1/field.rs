//! Arithmetic in the base field of secp256k1 (integers modulo `p = 2^256 - 2^32 - 977`).

use super::limbs::{self, Limbs};

/// An element of the base field, always stored in canonical form (`< p`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct FieldElement(Limbs);

impl FieldElement {
    pub(crate) const ZERO: Self = Self([0, 0, 0, 0]);
    pub(crate) const ONE: Self = Self([1, 0, 0, 0]);

    /// The curve constant `b` in `y^2 = x^3 + b`.
    pub(crate) const B: Self = Self([7, 0, 0, 0]);

    const MODULUS: Limbs = [
        0xFFFF_FFFE_FFFF_FC2F,
        0xFFFF_FFFF_FFFF_FFFF,
        0xFFFF_FFFF_FFFF_FFFF,
        0xFFFF_FFFF_FFFF_FFFF,
    ];

    /// `2^256 mod p`.
    const REDUCTION: [u64; 1] = [0x1_0000_03D1];

    const MODULUS_MINUS_TWO: Limbs = [
        0xFFFF_FFFE_FFFF_FC2D,
        0xFFFF_FFFF_FFFF_FFFF,
        0xFFFF_FFFF_FFFF_FFFF,
        0xFFFF_FFFF_FFFF_FFFF,
    ];

    /// Build from limbs known to be canonical.
    pub(crate) const fn from_limbs_unchecked(limbs: Limbs) -> Self {
        Self(limbs)
    }

    /// Decode a big-endian encoding, rejecting values `>= p`.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let value = limbs::from_be_bytes(bytes);
        if limbs::lt(&value, &Self::MODULUS) == 1 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        limbs::to_be_bytes(&self.0)
    }

    pub(crate) fn is_zero(&self) -> bool {
        limbs::is_zero(&self.0) == 1
    }

    pub(crate) fn add(&self, other: &Self) -> Self {
        Self(limbs::add_mod(&self.0, &other.0, &Self::MODULUS))
    }

    pub(crate) fn sub(&self, other: &Self) -> Self {
        Self(limbs::sub_mod(&self.0, &other.0, &Self::MODULUS))
    }

    pub(crate) fn double(&self) -> Self {
        self.add(self)
    }

    pub(crate) fn negate(&self) -> Self {
        Self::ZERO.sub(self)
    }

    pub(crate) fn mul(&self, other: &Self) -> Self {
        let wide = limbs::mul_wide(&self.0, &other.0);
        Self(limbs::reduce_wide(&wide, &Self::REDUCTION, &Self::MODULUS, 3))
    }

    pub(crate) fn square(&self) -> Self {
        self.mul(self)
    }

    /// Multiplicative inverse via Fermat's little theorem (`a^(p-2)`).
    ///
    /// Returns `None` for zero (computed in full either way).
    pub(crate) fn invert(&self) -> Option<Self> {
        let mut result = Self::ONE;
        for bit in limbs::bits_msb_first(&Self::MODULUS_MINUS_TWO) {
            result = result.square();
            let product = result.mul(self);
            result = Self::select(bit, &product, &result);
        }
        if self.is_zero() {
            None
        } else {
            Some(result)
        }
    }

    /// Returns `a` if `flag` is 1, `b` if it is 0.
    pub(crate) fn select(flag: u64, a: &Self, b: &Self) -> Self {
        Self(limbs::select(limbs::mask(flag), &a.0, &b.0))
    }
}
