#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use secp256k1_compact::{
    secp256k1::{PrivateKey, PublicKey, Signature, SIGNATURE_LENGTH},
    Sha256,
};

#[derive(Debug, Arbitrary)]
enum FuzzInput {
    Signature(Vec<u8>),
    PublicKey(Vec<u8>),
    PrivateKey(Vec<u8>),
    Verify {
        signature: [u8; SIGNATURE_LENGTH],
        x: Vec<u8>,
        y: Vec<u8>,
        message: Vec<u8>,
    },
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Signature(bytes) => match Signature::try_from(bytes.as_slice()) {
            Ok(signature) => {
                assert_eq!(bytes.len(), SIGNATURE_LENGTH);
                assert_eq!(signature.as_ref(), bytes.as_slice());
                assert_eq!(&signature.r()[..], &bytes[..32]);
                assert_eq!(&signature.s()[..], &bytes[32..]);

                let normalized = signature.normalize_s();
                assert!(normalized.is_normalized());
                assert!(normalized.normalize_s().equals(&normalized));
                assert_eq!(normalized.r(), signature.r());
            }
            Err(_) => assert_ne!(bytes.len(), SIGNATURE_LENGTH),
        },
        FuzzInput::PublicKey(bytes) => {
            if let Ok(public_key) = PublicKey::try_from(bytes.as_slice()) {
                assert_eq!(public_key.as_ref(), bytes.as_slice());
                let decoded = PublicKey::from_coordinates(&public_key.x(), &public_key.y());
                assert_eq!(decoded.unwrap(), public_key);
            }
        }
        FuzzInput::PrivateKey(bytes) => {
            if let Ok(private_key) = PrivateKey::try_from(bytes.as_slice()) {
                let public_key = private_key.public_key();
                let signature = private_key.sign::<Sha256>(None, &bytes).unwrap();
                assert!(public_key.verify::<Sha256>(None, &bytes, &signature));
            }
        }
        FuzzInput::Verify {
            signature,
            x,
            y,
            message,
        } => {
            // Must never panic, whatever the inputs
            let _ = Signature::from(signature).verify::<Sha256>(&message, &x, &y);
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
