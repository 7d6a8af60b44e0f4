//! Points on `y^2 = x^3 + 7` over the base field.
//!
//! [AffinePoint] is the public value type. Internally, arithmetic runs on Jacobian
//! coordinates (`x = X / Z^2`, `y = Y / Z^3`) so that no field inversion is needed until a
//! result is converted back to affine form.

use super::{field::FieldElement, limbs, scalar::Scalar};
use crate::{utils::hex, Error};
use std::{
    fmt::{Debug, Display},
    ops::{Add, Neg},
};

/// Length of one encoded coordinate (in bytes).
pub const COORDINATE_LENGTH: usize = 32;

const GENERATOR_X: FieldElement = FieldElement::from_limbs_unchecked([
    0x59F2_815B_16F8_1798,
    0x029B_FCDB_2DCE_28D9,
    0x55A0_6295_CE87_0B07,
    0x79BE_667E_F9DC_BBAC,
]);

const GENERATOR_Y: FieldElement = FieldElement::from_limbs_unchecked([
    0x9C47_D08F_FB10_D4B8,
    0xFD17_B448_A685_5419,
    0x5DA4_FBFC_0E11_08A8,
    0x483A_DA77_26A3_C465,
]);

/// A curve point in affine coordinates, or the identity (point at infinity).
///
/// The identity is stored with zeroed coordinates so that derived equality is exact.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AffinePoint {
    x: FieldElement,
    y: FieldElement,
    infinity: bool,
}

impl AffinePoint {
    pub const fn identity() -> Self {
        Self {
            x: FieldElement::ZERO,
            y: FieldElement::ZERO,
            infinity: true,
        }
    }

    pub const fn generator() -> Self {
        Self {
            x: GENERATOR_X,
            y: GENERATOR_Y,
            infinity: false,
        }
    }

    /// Build a point from 32-byte big-endian coordinates.
    ///
    /// Fails with [Error::InvalidPublicKey] if either coordinate is not exactly 32 bytes,
    /// is not a canonical field element, or if `(x, y)` does not satisfy the curve equation.
    pub fn from_coordinates(x: &[u8], y: &[u8]) -> Result<Self, Error> {
        let x: &[u8; COORDINATE_LENGTH] = x.try_into().map_err(|_| Error::InvalidPublicKey)?;
        let y: &[u8; COORDINATE_LENGTH] = y.try_into().map_err(|_| Error::InvalidPublicKey)?;
        let x = FieldElement::from_bytes(x).ok_or(Error::InvalidPublicKey)?;
        let y = FieldElement::from_bytes(y).ok_or(Error::InvalidPublicKey)?;
        let point = Self {
            x,
            y,
            infinity: false,
        };
        if !point.is_on_curve() {
            return Err(Error::InvalidPublicKey);
        }
        Ok(point)
    }

    fn is_on_curve(&self) -> bool {
        let lhs = self.y.square();
        let rhs = self.x.square().mul(&self.x).add(&FieldElement::B);
        lhs == rhs
    }

    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    /// Big-endian x-coordinate (all zeros for the identity).
    pub fn x(&self) -> [u8; COORDINATE_LENGTH] {
        self.x.to_bytes()
    }

    /// Big-endian y-coordinate (all zeros for the identity).
    pub fn y(&self) -> [u8; COORDINATE_LENGTH] {
        self.y.to_bytes()
    }

    /// Both coordinates, or `None` for the identity.
    pub fn coordinates(&self) -> Option<([u8; COORDINATE_LENGTH], [u8; COORDINATE_LENGTH])> {
        if self.infinity {
            return None;
        }
        Some((self.x(), self.y()))
    }

    /// Compute `scalar * self`.
    pub fn mul(&self, scalar: &Scalar) -> Self {
        ProjectivePoint::from(*self).mul(scalar).to_affine()
    }
}

impl Add for AffinePoint {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        ProjectivePoint::from(self)
            .add(&ProjectivePoint::from(other))
            .to_affine()
    }
}

impl Neg for AffinePoint {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: self.x,
            y: self.y.negate(),
            infinity: self.infinity,
        }
    }
}

impl Debug for AffinePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

impl Display for AffinePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.coordinates() {
            None => write!(f, "identity"),
            Some((x, y)) => write!(f, "({}, {})", hex(&x), hex(&y)),
        }
    }
}

/// A point in Jacobian coordinates. The identity has `Z = 0`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ProjectivePoint {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl From<AffinePoint> for ProjectivePoint {
    fn from(point: AffinePoint) -> Self {
        let finite = Self {
            x: point.x,
            y: point.y,
            z: FieldElement::ONE,
        };
        Self::select(u64::from(point.infinity), &Self::IDENTITY, &finite)
    }
}

impl ProjectivePoint {
    pub(crate) const IDENTITY: Self = Self {
        x: FieldElement::ONE,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    /// Returns `a` if `flag` is 1, `b` if it is 0.
    fn select(flag: u64, a: &Self, b: &Self) -> Self {
        Self {
            x: FieldElement::select(flag, &a.x, &b.x),
            y: FieldElement::select(flag, &a.y, &b.y),
            z: FieldElement::select(flag, &a.z, &b.z),
        }
    }

    /// Swap `a` and `b` if `flag` is 1.
    fn conditional_swap(flag: u64, a: &mut Self, b: &mut Self) {
        let swapped_a = Self::select(flag, b, a);
        let swapped_b = Self::select(flag, a, b);
        *a = swapped_a;
        *b = swapped_b;
    }

    /// Point doubling for `a = 0` ("dbl-2009-l"). The identity doubles to itself.
    pub(crate) fn double(&self) -> Self {
        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let d = self.x.add(&b).square().sub(&a).sub(&c).double();
        let e = a.double().add(&a);
        let f = e.square();

        let x3 = f.sub(&d.double());
        let y3 = e.mul(&d.sub(&x3)).sub(&c.double().double().double());
        let z3 = self.y.mul(&self.z).double();
        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Complete point addition ("add-2007-bl" with the exceptional cases selected in).
    ///
    /// Handles identity operands, `P + P` and `P + (-P)` without branching on the inputs.
    pub(crate) fn add(&self, other: &Self) -> Self {
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x.mul(&z2z2);
        let u2 = other.x.mul(&z1z1);
        let s1 = self.y.mul(&other.z).mul(&z2z2);
        let s2 = other.y.mul(&self.z).mul(&z1z1);
        let h = u2.sub(&u1);
        let i = h.double().square();
        let j = h.mul(&i);
        let r = s2.sub(&s1).double();
        let v = u1.mul(&i);

        let x3 = r.square().sub(&j).sub(&v.double());
        let y3 = r.mul(&v.sub(&x3)).sub(&s1.mul(&j).double());
        let z3 = self.z.add(&other.z).square().sub(&z1z1).sub(&z2z2).mul(&h);
        let sum = Self {
            x: x3,
            y: y3,
            z: z3,
        };

        // When h = 0 and r = 0 the inputs are equal and the formula degenerates. When
        // h = 0 and r != 0 they are inverses and z3 is already zero.
        let doubled = self.double();
        let same = u64::from(h.is_zero()) & u64::from(r.is_zero());
        let result = Self::select(same, &doubled, &sum);

        let result = Self::select(u64::from(other.z.is_zero()), self, &result);
        Self::select(u64::from(self.z.is_zero()), other, &result)
    }

    /// Montgomery ladder over all 256 bits of `k`.
    pub(crate) fn mul(&self, k: &Scalar) -> Self {
        let mut r0 = Self::IDENTITY;
        let mut r1 = *self;
        for bit in limbs::bits_msb_first(k.limbs()) {
            Self::conditional_swap(bit, &mut r0, &mut r1);
            r1 = r0.add(&r1);
            r0 = r0.double();
            Self::conditional_swap(bit, &mut r0, &mut r1);
        }
        r0
    }

    pub(crate) fn to_affine(&self) -> AffinePoint {
        let Some(z_inv) = self.z.invert() else {
            return AffinePoint::identity();
        };
        let z_inv2 = z_inv.square();
        let z_inv3 = z_inv2.mul(&z_inv);
        AffinePoint {
            x: self.x.mul(&z_inv2),
            y: self.y.mul(&z_inv3),
            infinity: false,
        }
    }
}

/// Compute the x-coordinate of `k * G`.
///
/// `k` is a big-endian scalar of at most 32 bytes and must lie in `[1, N)`.
pub fn mul_g(k: &[u8]) -> Result<[u8; COORDINATE_LENGTH], Error> {
    let k = Scalar::from_secret_slice(k)?;
    Ok(AffinePoint::generator().mul(&k).x())
}

/// Compute `scalar * (x, y)`.
///
/// The point must be on the curve ([Error::InvalidPublicKey] otherwise). The scalar is a
/// big-endian value of at most 32 bytes and is reduced modulo `N`; a zero scalar yields the
/// identity.
pub fn ec_mul(x: &[u8], y: &[u8], scalar: &[u8]) -> Result<AffinePoint, Error> {
    let point = AffinePoint::from_coordinates(x, y)?;
    let scalar = Scalar::from_slice_reduced(scalar)?;
    Ok(point.mul(&scalar))
}

/// Compute `point + scalar * G`.
///
/// This is the second half of the verification equation, `R' = (r / s) * Q + (e / s) * G`.
pub fn add_scaled_generator(point: &AffinePoint, scalar: &[u8]) -> Result<AffinePoint, Error> {
    let scalar = Scalar::from_slice_reduced(scalar)?;
    Ok(*point + AffinePoint::generator().mul(&scalar))
}
