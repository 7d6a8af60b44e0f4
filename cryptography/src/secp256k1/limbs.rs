//! Fixed-width 256-bit arithmetic on little-endian `u64` limbs.
//!
//! Shared by the base field (modulo p) and the scalar field (modulo N). Every routine
//! runs the same sequence of operations regardless of its inputs; conditional results
//! are chosen with masks instead of branches.

/// Four little-endian 64-bit limbs.
pub(crate) type Limbs = [u64; 4];

/// Eight little-endian 64-bit limbs (the width of a full product).
pub(crate) type WideLimbs = [u64; 8];

pub(crate) const ZERO: Limbs = [0, 0, 0, 0];

/// Decode 32 big-endian bytes.
pub(crate) fn from_be_bytes(bytes: &[u8; 32]) -> Limbs {
    let mut limbs = ZERO;
    for (i, limb) in limbs.iter_mut().enumerate() {
        let offset = (3 - i) * 8;
        let mut chunk = [0u8; 8];
        chunk.copy_from_slice(&bytes[offset..offset + 8]);
        *limb = u64::from_be_bytes(chunk);
    }
    limbs
}

/// Encode as 32 big-endian bytes.
pub(crate) fn to_be_bytes(limbs: &Limbs) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (i, limb) in limbs.iter().enumerate() {
        let offset = (3 - i) * 8;
        bytes[offset..offset + 8].copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}

/// Returns `a + b` and the carry out (0 or 1).
pub(crate) fn adc(a: &Limbs, b: &Limbs) -> (Limbs, u64) {
    let mut out = ZERO;
    let mut carry = 0u128;
    for i in 0..4 {
        let sum = a[i] as u128 + b[i] as u128 + carry;
        out[i] = sum as u64;
        carry = sum >> 64;
    }
    (out, carry as u64)
}

/// Returns `a - b` and the borrow out (1 if `a < b`).
pub(crate) fn sbb(a: &Limbs, b: &Limbs) -> (Limbs, u64) {
    let mut out = ZERO;
    let mut borrow = 0u128;
    for i in 0..4 {
        let diff = (a[i] as u128).wrapping_sub(b[i] as u128).wrapping_sub(borrow);
        out[i] = diff as u64;
        borrow = (diff >> 64) & 1;
    }
    (out, borrow as u64)
}

/// Expand a 0/1 flag into an all-zeros/all-ones mask.
#[inline]
pub(crate) fn mask(flag: u64) -> u64 {
    0u64.wrapping_sub(flag & 1)
}

/// Returns `a` if `mask` is all ones, `b` if it is all zeros.
#[inline]
pub(crate) fn select(mask: u64, a: &Limbs, b: &Limbs) -> Limbs {
    [
        (a[0] & mask) | (b[0] & !mask),
        (a[1] & mask) | (b[1] & !mask),
        (a[2] & mask) | (b[2] & !mask),
        (a[3] & mask) | (b[3] & !mask),
    ]
}

/// Returns 1 if every limb is zero, 0 otherwise.
#[inline]
pub(crate) fn is_zero(a: &Limbs) -> u64 {
    let or = a[0] | a[1] | a[2] | a[3];
    1 ^ ((or | or.wrapping_neg()) >> 63)
}

/// Returns 1 if `a < b`, 0 otherwise.
#[inline]
pub(crate) fn lt(a: &Limbs, b: &Limbs) -> u64 {
    sbb(a, b).1
}

/// `(a + b) mod m` for `a, b < m`.
pub(crate) fn add_mod(a: &Limbs, b: &Limbs, m: &Limbs) -> Limbs {
    let (sum, carry) = adc(a, b);
    let (reduced, borrow) = sbb(&sum, m);
    select(mask(carry | (borrow ^ 1)), &reduced, &sum)
}

/// `(a - b) mod m` for `a, b < m`.
pub(crate) fn sub_mod(a: &Limbs, b: &Limbs, m: &Limbs) -> Limbs {
    let (diff, borrow) = sbb(a, b);
    let (wrapped, _) = adc(&diff, m);
    select(mask(borrow), &wrapped, &diff)
}

/// Subtract `m` once if `a >= m`.
pub(crate) fn reduce_once(a: &Limbs, m: &Limbs) -> Limbs {
    let (reduced, borrow) = sbb(a, m);
    select(mask(borrow ^ 1), &reduced, a)
}

/// Schoolbook 256x256 -> 512-bit multiplication.
pub(crate) fn mul_wide(a: &Limbs, b: &Limbs) -> WideLimbs {
    let mut out = [0u64; 8];
    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 {
            let t = out[i + j] as u128 + (a[i] as u128) * (b[j] as u128) + carry;
            out[i + j] = t as u64;
            carry = t >> 64;
        }
        out[i + 4] = carry as u64;
    }
    out
}

/// Replace the high half `hi` of `lo + hi * 2^256` with `hi * c`, where `c = 2^256 mod m`.
///
/// The value stays congruent modulo `m` and shrinks by roughly `256 - bits(c)` bits.
fn fold(w: &WideLimbs, c: &[u64]) -> WideLimbs {
    let mut out = [0u64; 8];
    out[..4].copy_from_slice(&w[..4]);
    for i in 0..4 {
        let mut carry = 0u128;
        for (j, cj) in c.iter().enumerate() {
            let t = out[i + j] as u128 + (w[4 + i] as u128) * (*cj as u128) + carry;
            out[i + j] = t as u64;
            carry = t >> 64;
        }
        for limb in out.iter_mut().skip(i + c.len()) {
            let t = *limb as u128 + carry;
            *limb = t as u64;
            carry = t >> 64;
        }
    }
    out
}

/// Reduce a 512-bit value modulo `m`, where `c = 2^256 - m` (equivalently `2^256 mod m`).
///
/// `folds` must be large enough for the high half to vanish: 3 when `c` fits in 33 bits,
/// 4 when it fits in 129 bits.
pub(crate) fn reduce_wide(w: &WideLimbs, c: &[u64], m: &Limbs, folds: usize) -> Limbs {
    let mut w = *w;
    for _ in 0..folds {
        w = fold(&w, c);
    }
    debug_assert!(w[4..].iter().all(|limb| *limb == 0));
    reduce_once(&[w[0], w[1], w[2], w[3]], m)
}

/// Iterate the bits of `e` from most to least significant.
pub(crate) fn bits_msb_first(e: &Limbs) -> impl Iterator<Item = u64> + '_ {
    (0..256).rev().map(move |i| (e[i / 64] >> (i % 64)) & 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: Limbs = [u64::MAX; 4];

    #[test]
    fn test_bytes_roundtrip_order() {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        assert_eq!(from_be_bytes(&bytes), [1, 0, 0, 0]);
        bytes[0] = 0x80;
        assert_eq!(from_be_bytes(&bytes), [1, 0, 0, 0x8000_0000_0000_0000]);
        assert_eq!(to_be_bytes(&from_be_bytes(&bytes)), bytes);
    }

    #[test]
    fn test_adc_sbb() {
        let (sum, carry) = adc(&MAX, &[1, 0, 0, 0]);
        assert_eq!(sum, ZERO);
        assert_eq!(carry, 1);

        let (diff, borrow) = sbb(&ZERO, &[1, 0, 0, 0]);
        assert_eq!(diff, MAX);
        assert_eq!(borrow, 1);

        let (diff, borrow) = sbb(&[5, 0, 0, 0], &[3, 0, 0, 0]);
        assert_eq!(diff, [2, 0, 0, 0]);
        assert_eq!(borrow, 0);
    }

    #[test]
    fn test_predicates() {
        assert_eq!(is_zero(&ZERO), 1);
        assert_eq!(is_zero(&[0, 0, 0, 1]), 0);
        assert_eq!(lt(&[1, 0, 0, 0], &[0, 1, 0, 0]), 1);
        assert_eq!(lt(&[0, 1, 0, 0], &[1, 0, 0, 0]), 0);
        assert_eq!(lt(&MAX, &MAX), 0);
        assert_eq!(select(mask(1), &MAX, &ZERO), MAX);
        assert_eq!(select(mask(0), &MAX, &ZERO), ZERO);
    }

    #[test]
    fn test_mul_wide() {
        // (2^256 - 1)^2 = 2^512 - 2^257 + 1
        let product = mul_wide(&MAX, &MAX);
        assert_eq!(product, [1, 0, 0, 0, u64::MAX - 1, u64::MAX, u64::MAX, u64::MAX]);
    }

    #[test]
    fn test_reduce_wide_small_modulus_shape() {
        // m = 2^256 - 5, so 2^256 = 5 (mod m) and 2^256 + 3 = 8 (mod m)
        let m: Limbs = [u64::MAX - 4, u64::MAX, u64::MAX, u64::MAX];
        let w: WideLimbs = [3, 0, 0, 0, 1, 0, 0, 0];
        assert_eq!(reduce_wide(&w, &[5], &m, 3), [8, 0, 0, 0]);

        // m itself reduces to zero
        let w: WideLimbs = [m[0], m[1], m[2], m[3], 0, 0, 0, 0];
        assert_eq!(reduce_wide(&w, &[5], &m, 3), ZERO);
    }

    #[test]
    fn test_bits_msb_first() {
        let bits: Vec<u64> = bits_msb_first(&[0b101, 0, 0, 1 << 63]).collect();
        assert_eq!(bits.len(), 256);
        assert_eq!(bits[0], 1);
        assert_eq!(bits[1], 0);
        assert_eq!(&bits[253..], &[1, 0, 1]);
    }
}
