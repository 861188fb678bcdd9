use crate::marshal::bytes::ByteReader;
use crate::marshal::{Header, MarshalError};

#[test]
fn accepts_current_version() {
	let mut reader = ByteReader::new(&[0x04_u8, 0x08, 0x30][..]);
	let header = Header::read(&mut reader).expect("header parses");
	assert_eq!(header, Header::CURRENT);
	assert_eq!(reader.pos(), 2);
}

#[test]
fn accepts_older_minor_versions() {
	for minor in 0..=8 {
		let header = Header { major: 4, minor }.validate().expect("older minor accepted");
		assert_eq!(header.minor, minor);
	}
}

#[test]
fn rejects_newer_minor_and_consumes_both_bytes() {
	let mut reader = ByteReader::new(&[0x04_u8, 0x09, 0x30][..]);
	let err = Header::read(&mut reader).expect_err("minor 9 should fail");
	assert!(matches!(err, MarshalError::UnsupportedVersion { major: 4, minor: 9 }));
	assert_eq!(reader.pos(), 2);
}

#[test]
fn rejects_other_major() {
	let err = Header { major: 3, minor: 8 }.validate().expect_err("major 3 should fail");
	assert!(matches!(err, MarshalError::UnsupportedVersion { major: 3, minor: 8 }));
}

#[test]
fn one_byte_stream_is_truncated() {
	let mut reader = ByteReader::new(&[0x04_u8][..]);
	let err = Header::read(&mut reader).expect_err("short header should fail");
	assert!(matches!(err, MarshalError::TruncatedInput { at: 1, .. }));
}

#[test]
fn encodes_current_version() {
	assert_eq!(Header::CURRENT.to_bytes(), [0x04, 0x08]);
}
