#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;
use secp256k1_compact::{
    secp256k1::{add_mod_n, mod_inv_n, mul_mod_n, negate_n, ORDER},
    Error,
};

#[derive(Debug, Arbitrary)]
enum Operation {
    Add(Vec<u8>, Vec<u8>),
    Mul(Vec<u8>, Vec<u8>),
    Invert(Vec<u8>),
    Negate(Vec<u8>),
}

fn order() -> BigUint {
    BigUint::from_bytes_be(&ORDER)
}

fn to_biguint(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

fn check_overflow<T: std::fmt::Debug>(operands: &[&[u8]], result: &Result<T, Error>) -> bool {
    match operands.iter().find(|operand| operand.len() > 32) {
        Some(operand) => {
            assert!(matches!(result, Err(Error::ArithmeticOverflow(len)) if *len == operand.len()));
            true
        }
        None => false,
    }
}

fn fuzz(op: Operation) {
    let n = order();
    match op {
        Operation::Add(a, b) => {
            let result = add_mod_n(&a, &b);
            if check_overflow(&[&a, &b], &result) {
                return;
            }
            let expected = (to_biguint(&a) + to_biguint(&b)) % &n;
            assert_eq!(to_biguint(&result.unwrap()), expected);
        }
        Operation::Mul(a, b) => {
            let result = mul_mod_n(&a, &b);
            if check_overflow(&[&a, &b], &result) {
                return;
            }
            let expected = (to_biguint(&a) * to_biguint(&b)) % &n;
            assert_eq!(to_biguint(&result.unwrap()), expected);
        }
        Operation::Invert(a) => {
            let result = mod_inv_n(&a);
            if check_overflow(&[&a], &result) {
                return;
            }
            let reduced = to_biguint(&a) % &n;
            if reduced == BigUint::from(0u8) {
                assert_eq!(result, Err(Error::InvalidSecretKey));
                return;
            }
            let inverse = to_biguint(&result.unwrap());
            assert!(inverse < n);
            assert_eq!((reduced * inverse) % &n, BigUint::from(1u8));
        }
        Operation::Negate(a) => {
            let result = negate_n(&a);
            if check_overflow(&[&a], &result) {
                return;
            }
            let expected = (&n - to_biguint(&a) % &n) % &n;
            assert_eq!(to_biguint(&result.unwrap()), expected);
        }
    }
}

fuzz_target!(|ops: Vec<Operation>| {
    for op in ops {
        fuzz(op);
    }
});
