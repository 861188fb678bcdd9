#![allow(missing_docs)]

use num_bigint::BigInt;
use rbmarshal::marshal::{Encoding, MarshalError, MarshalFile, Value, from_reader, from_slice, from_slice_into, to_vec};

rbmarshal::marshal_record! {
	#[derive(Debug, Default, PartialEq)]
	pub struct RedisConf {
		pub host: String => "host",
		pub db: i64 => "db",
	}
}

fn bytes(hex: &str) -> Vec<u8> {
	hex::decode(hex).expect("vector is hex")
}

#[test]
fn symbol_keyed_hash_maps_into_record() {
	let input = bytes("04087b073a09686f737449220e6c6f63616c686f7374063a0645543a0764626906");
	let conf: RedisConf = from_slice_into(&input).expect("record maps");
	assert_eq!(
		conf,
		RedisConf {
			host: "localhost".to_owned(),
			db: 1,
		}
	);
}

#[test]
fn reader_and_slice_entry_points_agree() {
	let input = bytes("0408492209686f6765063a064554");
	let from_bytes = from_slice(&input).expect("slice decodes");
	let from_stream = from_reader(&input[..]).expect("reader decodes");
	assert_eq!(from_bytes, from_stream);
	assert_eq!(from_bytes.encoding(), Some(&Encoding::Utf8));
}

#[test]
fn short_form_integers_round_trip() {
	for value in -123_i64..=122 {
		let encoded = to_vec(&value).expect("integer encodes");
		assert_eq!(encoded.len(), 4, "{value} should use the single-byte form");
		assert_eq!(from_slice(&encoded).expect("integer decodes"), Value::Integer(value));
	}
}

#[test]
fn fixnum_envelope_edges_round_trip() {
	for value in [123_i64, -124, 255, 256, -256, -257, 65_535, 65_536, 0x3fff_ffff, -0x4000_0000] {
		let encoded = to_vec(&value).expect("integer encodes");
		assert_eq!(from_slice(&encoded).expect("integer decodes"), Value::Integer(value));
	}
}

#[test]
fn promoted_bignum_decodes_as_bignum() {
	let value = -(1_i64 << 50);
	let encoded = to_vec(&value).expect("bignum encodes");
	let decoded = from_slice(&encoded).expect("bignum decodes");
	assert_eq!(decoded.as_bigint(), Some(&BigInt::from(value)));
}

#[test]
fn every_unsupported_tag_is_reported() {
	for (tag, construct) in [(b'[', "array"), (b'o', "object"), (b'/', "regexp"), (b'c', "class"), (b'm', "module")] {
		let err = from_slice(&[0x04, 0x08, tag]).expect_err("construct is unsupported");
		assert!(
			matches!(err, MarshalError::UnsupportedConstruct { construct: got, .. } if got == construct),
			"tag {tag:#x} gave {err:?}"
		);
	}
}

#[test]
fn file_loading_reads_from_disk() {
	let path = std::env::temp_dir().join(format!("rbmarshal-vector-{}.bin", std::process::id()));
	std::fs::write(&path, bytes("040869fdfffffe")).expect("write temp file");
	let file = MarshalFile::open(&path).expect("file opens");
	let _ = std::fs::remove_file(&path);
	assert_eq!(file.decode().expect("decodes"), Value::Integer(-65537));
}
