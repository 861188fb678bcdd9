use num_bigint::BigInt;

use crate::marshal::MarshalError;
use crate::marshal::bignum::{read_bignum, write_bignum};
use crate::marshal::bytes::ByteReader;

#[test]
fn decodes_positive_bignum() {
	let body = [b'+', 0x07, 0x0b, 0x83, 0x22, 0x60];
	let value = read_bignum(&mut ByteReader::new(&body[..])).expect("bignum decodes");
	assert_eq!(value, BigInt::from(1_612_874_507_i64));
}

#[test]
fn decodes_negative_bignum() {
	let body = [b'-', 0x09, 0xb9, 0xa3, 0x38, 0x97, 0x22, 0x26, 0x36, 0x00];
	let value = read_bignum(&mut ByteReader::new(&body[..])).expect("bignum decodes");
	assert_eq!(value, BigInt::from(-15_241_578_750_190_521_i64));
}

#[test]
fn encodes_with_even_padding() {
	let mut out = Vec::new();
	write_bignum(&mut out, &BigInt::from(-15_241_578_750_190_521_i64)).expect("bignum encodes");
	assert_eq!(out, vec![b'-', 0x09, 0xb9, 0xa3, 0x38, 0x97, 0x22, 0x26, 0x36, 0x00]);
}

#[test]
fn values_wider_than_i64_survive() {
	let value: BigInt = -(BigInt::from(u64::MAX) * BigInt::from(u64::MAX));
	let mut out = Vec::new();
	write_bignum(&mut out, &value).expect("bignum encodes");
	assert_eq!((out.len() - 2) % 2, 0);
	let back = read_bignum(&mut ByteReader::new(&out[..])).expect("bignum decodes");
	assert_eq!(back, value);
}

#[test]
fn rejects_unknown_sign() {
	let err = read_bignum(&mut ByteReader::new(&[b'x', 0x06, 0x01, 0x00][..])).expect_err("bad sign");
	assert!(matches!(err, MarshalError::InvalidBignumSign { sign: b'x', at: 0 }));
}

#[test]
fn truncated_magnitude_fails() {
	let err = read_bignum(&mut ByteReader::new(&[b'+', 0x07, 0x0b, 0x83][..])).expect_err("short magnitude");
	assert!(matches!(err, MarshalError::TruncatedInput { at: 2, need: 4, got: 2 }));
}
