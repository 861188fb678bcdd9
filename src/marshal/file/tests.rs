use crate::marshal::{MarshalError, MarshalFile, Value};

fn bytes(hex: &str) -> Vec<u8> {
	hex::decode(hex).expect("vector is hex")
}

#[test]
fn stream_loads_and_decodes() {
	let raw = bytes("0408492209686f6765063a064554");
	let file = MarshalFile::from_bytes(raw.clone()).expect("stream loads");
	assert_eq!(file.header.minor, 8);
	assert_eq!(file.bytes(), &raw[..]);
	assert_eq!(file.decode().expect("decodes").as_str(), Some("hoge"));

	let text: String = file.decode_into().expect("maps into string");
	assert_eq!(text, "hoge");
}

#[test]
fn foreign_container_is_not_unwrapped() {
	let err = MarshalFile::from_bytes(bytes("28b52ffd0458")).err().expect("zstd frame is not a marshal stream");
	assert!(matches!(err, MarshalError::UnsupportedVersion { major: 0x28, minor: 0xb5 }));
}

#[test]
fn header_is_checked_on_load() {
	let err = MarshalFile::from_bytes(bytes("0308")).err().expect("bad header rejected");
	assert!(matches!(err, MarshalError::UnsupportedVersion { major: 3, minor: 8 }));

	let err = MarshalFile::from_bytes(Vec::new()).err().expect("empty input rejected");
	assert!(matches!(err, MarshalError::TruncatedInput { .. }));
}

#[test]
fn missing_file_is_io_error() {
	let err = MarshalFile::open("/nonexistent/rbmarshal/input.bin").err().expect("missing file");
	assert!(matches!(err, MarshalError::Io(_)));
}
