#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use secp256k1_compact::{
    secp256k1::{PrivateKey, Signature},
    DoubleSha256, Error, Hasher, Sha256,
};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    seed: u64,
    k: [u8; 32],
    message: Vec<u8>,
    namespace: Option<Vec<u8>>,
    flip: u16,
}

fn round_trip<H: Hasher>(input: &FuzzInput) {
    let private_key = PrivateKey::from_seed(input.seed);
    let public_key = private_key.public_key();
    let (x, y) = (public_key.x(), public_key.y());

    // Deterministic signing
    let signature = Signature::sign::<H>(&input.message, private_key.as_ref()).unwrap();
    let again = Signature::sign::<H>(&input.message, private_key.as_ref()).unwrap();
    assert!(signature.equals(&again));
    assert!(signature.verify::<H>(&input.message, &x, &y));
    assert!(signature.normalize_s().verify::<H>(&input.message, &x, &y));

    // Explicit nonce
    match Signature::sign_with_k::<H>(&input.message, &input.k, private_key.as_ref()) {
        Ok(signature) => assert!(signature.verify::<H>(&input.message, &x, &y)),
        Err(err) => assert_eq!(err, Error::InvalidSecretKey),
    }

    // Tampering with a single bit of the signature invalidates it
    let mut raw = [0u8; 64];
    raw.copy_from_slice(signature.as_ref());
    let bit = (input.flip % 512) as usize;
    raw[bit / 8] ^= 1 << (bit % 8);
    assert!(!Signature::from(raw).verify::<H>(&input.message, &x, &y));

    // Namespaced signatures
    let namespace = input.namespace.as_deref();
    let signature = private_key.sign::<H>(namespace, &input.message).unwrap();
    assert!(signature.is_normalized());
    assert!(public_key.verify::<H>(namespace, &input.message, &signature));
}

fuzz_target!(|input: FuzzInput| {
    round_trip::<Sha256>(&input);
    round_trip::<DoubleSha256>(&input);
});
