//! ECDSA over secp256k1 with compact 64-byte (`r || s`) signatures.
//!
//! Field, scalar, and point arithmetic are implemented on fixed-width limbs in this module
//! (no arbitrary-precision integers). Nonces are derived deterministically as specified in
//! [RFC 6979](https://datatracker.ietf.org/doc/html/rfc6979) and signatures can be normalized
//! to the low-S form of [BIP 62](https://github.com/bitcoin/bips/blob/master/bip-0062.mediawiki#low-s-values-in-signatures).
//!
//! Public keys are consumed as uncompressed affine coordinates: two 32-byte big-endian
//! values `(x, y)` without a prefix byte.
//!
//! # Example
//! ```rust
//! use secp256k1_compact::{secp256k1::{PrivateKey, PublicKey}, Keccak256};
//!
//! // Generate a new private key
//! let private_key = PrivateKey::from_rng(&mut rand::thread_rng());
//! let public_key: PublicKey = private_key.public_key();
//!
//! // Sign a namespaced message (the signature is normalized)
//! let namespace = Some(&b"demo"[..]);
//! let signature = private_key.sign::<Keccak256>(namespace, b"hello, world!").unwrap();
//! assert!(signature.is_normalized());
//!
//! // Verify the signature
//! assert!(public_key.verify::<Keccak256>(namespace, b"hello, world!", &signature));
//! ```

mod field;
mod limbs;
mod point;
pub mod rfc6979;
mod scalar;
mod scheme;

pub use point::{add_scaled_generator, ec_mul, mul_g, AffinePoint, COORDINATE_LENGTH};
pub use scalar::{
    add_mod_n, mod_inv_n, mul_mod_n, negate_n, Scalar, HALF_ORDER, ORDER, SCALAR_LENGTH,
};
pub use scheme::{
    PrivateKey, PublicKey, Signature, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH,
};
