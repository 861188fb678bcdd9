use std::fmt;

use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, MarshalError>;

/// Where a type mismatch was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
	/// The top-level target of a record mapping.
	Root,
	/// Byte offset in the input stream.
	Offset(usize),
	/// Dotted path of record fields, outermost first.
	Field(String),
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Root => f.write_str("root"),
			Self::Offset(at) => write!(f, "offset {at}"),
			Self::Field(path) => write!(f, "field `{path}`"),
		}
	}
}

/// Errors produced while reading, decoding, mapping, and encoding marshal data.
#[derive(Debug, Error)]
pub enum MarshalError {
	/// Filesystem or stream IO failure other than a short read.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Header major/minor pair is outside the supported range.
	#[error("unsupported marshal version {major}.{minor} (expected 4.0 through 4.8)")]
	UnsupportedVersion {
		/// Major version byte.
		major: u8,
		/// Minor version byte.
		minor: u8,
	},
	/// Input ended before a value was complete.
	#[error("truncated input at offset {at}: need {need} bytes, got {got}")]
	TruncatedInput {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes actually available.
		got: usize,
	},
	/// A recognized tag whose construct is not decoded or encoded.
	#[error("unsupported construct {construct} (tag 0x{tag:02x}) at offset {at}")]
	UnsupportedConstruct {
		/// Construct label.
		construct: &'static str,
		/// Tag byte, or `0` for encoder-side rejections.
		tag: u8,
		/// Byte offset of the tag.
		at: usize,
	},
	/// Tag byte outside the marshal tag space.
	#[error("unknown tag 0x{tag:02x} at offset {at}")]
	UnknownTag {
		/// Offending tag byte.
		tag: u8,
		/// Byte offset of the tag.
		at: usize,
	},
	/// Value kind does not match what the caller or the format requires.
	#[error("type mismatch at {location}: expected {expected}, got {got}")]
	TypeMismatch {
		/// Expected value kind.
		expected: &'static str,
		/// Actual value kind.
		got: &'static str,
		/// Stream offset or field path of the mismatch.
		location: Location,
	},
	/// Symbol or object link points outside the table.
	#[error("invalid {table} backreference {index} at offset {at} (table length {len})")]
	InvalidBackreference {
		/// Table kind (`symbol` or `object`).
		table: &'static str,
		/// Requested index.
		index: i64,
		/// Table length at the point of reference.
		len: usize,
		/// Byte offset of the link tag.
		at: usize,
	},
	/// Length or count prefix was negative.
	#[error("invalid length {len} at offset {at}")]
	InvalidLength {
		/// Parsed length.
		len: i64,
		/// Byte offset of the length prefix.
		at: usize,
	},
	/// Bignum sign byte was neither `+` nor `-`.
	#[error("invalid bignum sign byte 0x{sign:02x} at offset {at}")]
	InvalidBignumSign {
		/// Offending sign byte.
		sign: u8,
		/// Byte offset of the sign.
		at: usize,
	},
	/// Annotation name bytes are not valid UTF-8.
	#[error("symbol at offset {at} is not valid utf-8")]
	InvalidUtf8 {
		/// Byte offset of the symbol payload.
		at: usize,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Bytes remain after the top-level value.
	#[error("trailing bytes after top-level value at offset {at}")]
	TrailingBytes {
		/// Offset of the first unconsumed byte.
		at: usize,
	},
	/// Integer cannot be written in the fixnum varint form.
	#[error("integer {value} is outside the fixnum range -0x40000000..=0x3fffffff")]
	IntegerOutOfRange {
		/// Rejected value.
		value: i64,
	},
	/// Hex input could not be parsed.
	#[error("invalid hex input: {0}")]
	InvalidHex(#[from] hex::FromHexError),
}

impl MarshalError {
	/// Prefix a record field key onto the location of a type mismatch.
	pub(crate) fn within_field(self, key: &str) -> Self {
		match self {
			Self::TypeMismatch { expected, got, location } => {
				let location = match location {
					Location::Root | Location::Offset(_) => Location::Field(key.to_owned()),
					Location::Field(inner) => Location::Field(format!("{key}.{inner}")),
				};
				Self::TypeMismatch { expected, got, location }
			}
			other => other,
		}
	}
}
