/// Tag bytes recognized by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
	Nil,
	True,
	False,
	Fixnum,
	RawString,
	Symbol,
	SymbolLink,
	ObjectLink,
	Ivar,
	Array,
	Object,
	Hash,
	Bignum,
	Regexp,
	Class,
	Module,
}

impl Tag {
	/// Map a tag byte, or `None` for bytes outside the tag space.
	pub fn from_byte(byte: u8) -> Option<Self> {
		Some(match byte {
			b'0' => Self::Nil,
			b'T' => Self::True,
			b'F' => Self::False,
			b'i' => Self::Fixnum,
			b'"' => Self::RawString,
			b':' => Self::Symbol,
			b';' => Self::SymbolLink,
			b'@' => Self::ObjectLink,
			b'I' => Self::Ivar,
			b'[' => Self::Array,
			b'o' => Self::Object,
			b'{' => Self::Hash,
			b'l' => Self::Bignum,
			b'/' => Self::Regexp,
			b'c' => Self::Class,
			b'm' => Self::Module,
			_ => return None,
		})
	}

	pub fn byte(self) -> u8 {
		match self {
			Self::Nil => b'0',
			Self::True => b'T',
			Self::False => b'F',
			Self::Fixnum => b'i',
			Self::RawString => b'"',
			Self::Symbol => b':',
			Self::SymbolLink => b';',
			Self::ObjectLink => b'@',
			Self::Ivar => b'I',
			Self::Array => b'[',
			Self::Object => b'o',
			Self::Hash => b'{',
			Self::Bignum => b'l',
			Self::Regexp => b'/',
			Self::Class => b'c',
			Self::Module => b'm',
		}
	}

	/// Stable lowercase label used in errors and traces.
	pub fn name(self) -> &'static str {
		match self {
			Self::Nil => "nil",
			Self::True => "true",
			Self::False => "false",
			Self::Fixnum => "fixnum",
			Self::RawString => "raw_string",
			Self::Symbol => "symbol",
			Self::SymbolLink => "symbol_link",
			Self::ObjectLink => "object_link",
			Self::Ivar => "ivar",
			Self::Array => "array",
			Self::Object => "object",
			Self::Hash => "hash",
			Self::Bignum => "bignum",
			Self::Regexp => "regexp",
			Self::Class => "class",
			Self::Module => "module",
		}
	}
}
