use crate::marshal::{DecodeOptions, MarshalError, trace};

fn trace_hex(hex: &str) -> crate::marshal::Result<String> {
	let input = hex::decode(hex).expect("vector is hex");
	let mut out = Vec::new();
	trace(&input[..], &mut out, &DecodeOptions::default())?;
	Ok(String::from_utf8(out).expect("trace is utf-8"))
}

#[test]
fn traces_mapping_with_annotated_value() {
	let text = trace_hex("04087b073a09686f737449220e6c6f63616c686f7374063a0645543a0764626906").expect("trace succeeds");
	let expected = "\
version 4.8
hash size=2 {
    symbol \"host\"
    ivar {
        raw_string len=9 \"localhost\"
        ivar_count = 1
        symbol \"E\"
        true
    }
    symbol \"db\"
    fixnum 1
}
";
	assert_eq!(text, expected);
}

#[test]
fn traces_symbol_links_by_name() {
	let text = trace_hex("04087b074922096e616d65063a0645544922097461726f063b0054492208616765063b0054691a").expect("trace succeeds");
	assert_eq!(text.matches("symbol_link #0 -> \"E\"").count(), 2);
	assert!(text.ends_with("    fixnum 21\n}\n"));
}

#[test]
fn traces_constructs_the_decoder_rejects() {
	let text = trace_hex("04085b086f3a08466f6f063a066169f42f06610163064d").expect("trace succeeds");
	let expected = "\
version 4.8
array size=3 [
    object {
        symbol \"Foo\"
        ivar_count = 1
        symbol \"a\"
        fixnum -7
    }
    regexp pattern=\"a\" options=1
    class \"M\"
]
";
	assert_eq!(text, expected);
}

#[test]
fn traces_bignum_and_object_link() {
	let text = trace_hex("04085b076c2b070b8322604006").expect("trace succeeds");
	assert!(text.contains("    bignum 1612874507\n"));
	assert!(text.contains("    object_link #1\n"));
}

#[test]
fn unknown_tag_stops_the_trace() {
	let err = trace_hex("04085b0666").expect_err("float tag is unknown");
	assert!(matches!(err, MarshalError::UnknownTag { tag: b'f', at: 4 }));
}

#[test]
fn truncated_stream_is_reported() {
	let err = trace_hex("04087b073a09686f").expect_err("symbol bytes missing");
	assert!(matches!(err, MarshalError::TruncatedInput { .. }));
}
