use crate::marshal::MarshalError;
use crate::marshal::bytes::ByteReader;

#[test]
fn tracks_offset_across_reads() {
	let mut reader = ByteReader::new(&[1_u8, 2, 3, 4][..]);
	assert_eq!(reader.read_u8().expect("first byte"), 1);
	assert_eq!(reader.read_bytes(2).expect("two bytes"), vec![2, 3]);
	assert_eq!(reader.pos(), 3);
	assert!(!reader.at_end().expect("probe succeeds"));
	assert!(reader.at_end().expect("probe succeeds"));
}

#[test]
fn short_read_reports_offset_and_counts() {
	let mut reader = ByteReader::new(&[9_u8, 8][..]);
	reader.read_u8().expect("first byte");
	let err = reader.read_bytes(4).expect_err("short read should fail");
	assert!(matches!(err, MarshalError::TruncatedInput { at: 1, need: 4, got: 1 }));
}

#[test]
fn empty_source_is_truncated() {
	let mut reader = ByteReader::new(&[][..]);
	let err = reader.read_u8().expect_err("empty read should fail");
	assert!(matches!(err, MarshalError::TruncatedInput { at: 0, need: 1, got: 0 }));
}

#[test]
fn zero_length_read_succeeds_at_end() {
	let mut reader = ByteReader::new(&[][..]);
	assert!(reader.read_bytes(0).expect("empty read").is_empty());
}
