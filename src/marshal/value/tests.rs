use std::rc::Rc;

use crate::marshal::{Annotated, Encoding, Mapping, Value};

#[test]
fn string_constructor_is_utf8_annotated() {
	let value = Value::string("hoge");
	assert_eq!(value.kind(), "string");
	assert_eq!(value.as_str(), Some("hoge"));
	assert_eq!(value.encoding(), Some(&Encoding::Utf8));
}

#[test]
fn encoding_follows_annotations() {
	let ascii = Annotated::new(Value::raw(b"x"), vec![(Rc::from("E"), Value::Bool(false))]);
	assert_eq!(ascii.encoding, Encoding::UsAscii);

	let named = Annotated::new(Value::raw(b"x"), vec![(Rc::from("encoding"), Value::raw(b"Shift_JIS"))]);
	assert_eq!(named.encoding, Encoding::Named(Rc::from("Shift_JIS")));
	assert_eq!(named.encoding.to_string(), "Shift_JIS");

	let bare = Annotated::new(Value::raw(b"x"), Vec::new());
	assert_eq!(bare.encoding, Encoding::Binary);
	assert_eq!(bare.encoding.name(), "ASCII-8BIT");
}

#[test]
fn mapping_lookup_accepts_any_string_like_key() {
	let mut mapping = Mapping::new();
	mapping.push(Value::symbol("host"), Value::string("localhost"));
	mapping.push(Value::string("db"), Value::Integer(1));
	mapping.push(Value::raw(b"port"), Value::Integer(6379));

	assert_eq!(mapping.get("host").and_then(Value::as_str), Some("localhost"));
	assert_eq!(mapping.get("db").and_then(Value::as_i64), Some(1));
	assert_eq!(mapping.get("port").and_then(Value::as_i64), Some(6379));
	assert!(mapping.get("missing").is_none());

	let keys: Vec<_> = mapping.iter().filter_map(|(key, _)| key.as_str()).collect();
	assert_eq!(keys, vec!["host", "db", "port"]);
}

#[test]
fn clones_share_composite_payloads() {
	let value = Value::string("shared");
	let copy = value.clone();
	assert!(value.shares(&copy));
	assert!(!value.shares(&Value::string("shared")));
	assert!(!Value::Integer(1).shares(&Value::Integer(1)));
}

#[test]
fn serializes_as_plain_json() {
	let mut inner = Mapping::new();
	inner.push(Value::symbol("name"), Value::string("taro"));
	inner.push(Value::symbol("age"), Value::Integer(21));
	let mut outer = Mapping::new();
	outer.push(Value::symbol("user"), Value::Mapping(Rc::new(inner)));
	outer.push(Value::symbol("flag"), Value::Nil);

	let json = serde_json::to_value(Value::Mapping(Rc::new(outer))).expect("value serializes");
	assert_eq!(json, serde_json::json!({ "user": { "name": "taro", "age": 21 }, "flag": null }));
}
