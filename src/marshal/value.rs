use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use num_bigint::BigInt;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One decoded marshal value.
///
/// Composite payloads sit behind `Rc`, so clones and object backreferences
/// share the allocation of the position that first produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
	#[default]
	Nil,
	Bool(bool),
	Integer(i64),
	BigInteger(Rc<BigInt>),
	RawString(Rc<[u8]>),
	Symbol(Rc<[u8]>),
	Mapping(Rc<Mapping>),
	Annotated(Rc<Annotated>),
}

impl Value {
	/// UTF-8 string in the annotated form Ruby writes for `String` objects.
	pub fn string(text: &str) -> Self {
		Self::Annotated(Rc::new(Annotated::utf8(Self::RawString(Rc::from(text.as_bytes())))))
	}

	/// Unannotated byte string.
	pub fn raw(bytes: &[u8]) -> Self {
		Self::RawString(Rc::from(bytes))
	}

	/// Symbol value from UTF-8 text.
	pub fn symbol(name: &str) -> Self {
		Self::symbol_bytes(name.as_bytes())
	}

	/// Symbol value from raw bytes in any encoding.
	pub fn symbol_bytes(name: &[u8]) -> Self {
		Self::Symbol(Rc::from(name))
	}

	/// Stable lowercase label for the value kind.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Nil => "nil",
			Self::Bool(_) => "boolean",
			Self::Integer(_) => "integer",
			Self::BigInteger(_) => "bignum",
			Self::RawString(_) => "string",
			Self::Symbol(_) => "symbol",
			Self::Mapping(_) => "mapping",
			Self::Annotated(item) => match item.inner {
				Self::RawString(_) => "string",
				_ => "annotated",
			},
		}
	}

	/// Byte payload of a string-like value (raw string, symbol, or annotated string).
	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			Self::RawString(bytes) => Some(bytes.as_ref()),
			Self::Symbol(name) => Some(name.as_ref()),
			Self::Annotated(item) => item.inner.as_bytes(),
			_ => None,
		}
	}

	/// String-like payload when it is valid UTF-8.
	pub fn as_str(&self) -> Option<&str> {
		self.as_bytes().and_then(|bytes| std::str::from_utf8(bytes).ok())
	}

	/// Whether this value may serve as a mapping key.
	pub fn is_string_like(&self) -> bool {
		self.as_bytes().is_some()
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Integer(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_bigint(&self) -> Option<&BigInt> {
		match self {
			Self::BigInteger(value) => Some(value.as_ref()),
			_ => None,
		}
	}

	/// Mapping payload, looking through an annotation wrapper.
	pub fn as_mapping(&self) -> Option<&Mapping> {
		match self {
			Self::Mapping(mapping) => Some(mapping.as_ref()),
			Self::Annotated(item) => item.inner.as_mapping(),
			_ => None,
		}
	}

	/// Source encoding carried by an annotated value.
	pub fn encoding(&self) -> Option<&Encoding> {
		match self {
			Self::Annotated(item) => Some(&item.encoding),
			_ => None,
		}
	}

	pub fn is_nil(&self) -> bool {
		matches!(self, Self::Nil)
	}

	/// Whether both values point at the same composite allocation.
	pub fn shares(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::BigInteger(left), Self::BigInteger(right)) => Rc::ptr_eq(left, right),
			(Self::RawString(left), Self::RawString(right)) => Rc::ptr_eq(left, right),
			(Self::Mapping(left), Self::Mapping(right)) => Rc::ptr_eq(left, right),
			(Self::Annotated(left), Self::Annotated(right)) => Rc::ptr_eq(left, right),
			_ => false,
		}
	}
}

/// Ordered key/value pairs of a decoded hash.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
	entries: Vec<(Value, Value)>,
}

impl Mapping {
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn with_capacity(capacity: usize) -> Self {
		Self {
			entries: Vec::with_capacity(capacity),
		}
	}

	/// Append one pair, keeping insertion order.
	pub fn push(&mut self, key: Value, value: Value) {
		self.entries.push((key, value));
	}

	/// Look up the first value whose string-like key equals `key`.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.entries
			.iter()
			.find(|(candidate, _)| candidate.as_bytes() == Some(key.as_bytes()))
			.map(|(_, value)| value)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> {
		self.entries.iter()
	}
}

/// A value wrapped with instance-variable style annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotated {
	/// Wrapped value, usually a raw string.
	pub inner: Value,
	/// Annotation pairs in stream order.
	pub annotations: Vec<(Rc<str>, Value)>,
	/// Source encoding derived from the annotations.
	pub encoding: Encoding,
}

impl Annotated {
	/// Wrap `inner`, deriving the encoding from `annotations`.
	pub fn new(inner: Value, annotations: Vec<(Rc<str>, Value)>) -> Self {
		let encoding = Encoding::from_annotations(&annotations);
		Self {
			inner,
			annotations,
			encoding,
		}
	}

	/// Wrap `inner` with the single `E => true` marker.
	pub fn utf8(inner: Value) -> Self {
		Self::new(inner, vec![(Rc::from(Encoding::UTF8_MARKER), Value::Bool(true))])
	}

	/// Look up an annotation by name.
	pub fn annotation(&self, name: &str) -> Option<&Value> {
		self.annotations.iter().find(|(key, _)| key.as_ref() == name).map(|(_, value)| value)
	}
}

/// Source encoding of an annotated string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoding {
	/// `E => true`.
	Utf8,
	/// `E => false`.
	UsAscii,
	/// No encoding annotation (`ASCII-8BIT`).
	Binary,
	/// Explicit `encoding => "name"` annotation.
	Named(Rc<str>),
}

impl Encoding {
	/// Short annotation name marking UTF-8 or US-ASCII.
	pub const UTF8_MARKER: &'static str = "E";
	/// Annotation name carrying any other encoding name.
	pub const NAME_MARKER: &'static str = "encoding";

	/// Derive the encoding from annotation pairs.
	pub fn from_annotations(annotations: &[(Rc<str>, Value)]) -> Self {
		for (name, value) in annotations {
			match (name.as_ref(), value) {
				(Self::UTF8_MARKER, Value::Bool(true)) => return Self::Utf8,
				(Self::UTF8_MARKER, Value::Bool(false)) => return Self::UsAscii,
				(Self::NAME_MARKER, value) => {
					if let Some(text) = value.as_str() {
						return Self::Named(Rc::from(text));
					}
				}
				_ => {}
			}
		}
		Self::Binary
	}

	pub fn name(&self) -> &str {
		match self {
			Self::Utf8 => "UTF-8",
			Self::UsAscii => "US-ASCII",
			Self::Binary => "ASCII-8BIT",
			Self::Named(name) => name,
		}
	}
}

impl fmt::Display for Encoding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// JSON-style rendering: strings lossily decoded, bignums as decimal strings.
impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Self::Nil => serializer.serialize_none(),
			Self::Bool(value) => serializer.serialize_bool(*value),
			Self::Integer(value) => serializer.serialize_i64(*value),
			Self::BigInteger(value) => serializer.serialize_str(&value.to_string()),
			Self::RawString(bytes) => serializer.serialize_str(&String::from_utf8_lossy(bytes)),
			Self::Symbol(name) => serializer.serialize_str(&String::from_utf8_lossy(name)),
			Self::Annotated(item) => item.inner.serialize(serializer),
			Self::Mapping(mapping) => {
				let mut map = serializer.serialize_map(Some(mapping.len()))?;
				for (key, value) in mapping.iter() {
					map.serialize_entry(&key_label(key), value)?;
				}
				map.end()
			}
		}
	}
}

fn key_label(key: &Value) -> Cow<'_, str> {
	match key.as_bytes() {
		Some(bytes) => String::from_utf8_lossy(bytes),
		None => Cow::Borrowed(key.kind()),
	}
}

#[cfg(test)]
mod tests;
