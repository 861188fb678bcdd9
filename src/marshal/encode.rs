use std::io::Write;

use log::debug;
use num_bigint::BigInt;

use crate::marshal::bignum::write_bignum;
use crate::marshal::tag::Tag;
use crate::marshal::varint::{FIXNUM_MAX, FIXNUM_MIN, write_len, write_varint};
use crate::marshal::{Encoding, Header, MarshalError, Result, SymbolTable, Value};

/// Values the primitive encoder can write.
pub trait Encode {
	/// Append this value to the encoder's current stream.
	fn encode_to<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()>;
}

/// Writer of marshal streams for booleans, integers, and strings.
///
/// Every [`Encoder::encode`] call emits one complete stream and starts a
/// fresh symbol table. Output is buffered per stream, so a rejected value
/// writes nothing.
pub struct Encoder<W> {
	writer: W,
	buf: Vec<u8>,
	symbols: SymbolTable,
}

impl<W: Write> Encoder<W> {
	pub fn new(writer: W) -> Self {
		Self {
			writer,
			buf: Vec::new(),
			symbols: SymbolTable::new(),
		}
	}

	/// Write the header and one value.
	pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
		self.symbols.clear();
		self.buf.clear();
		self.buf.extend_from_slice(&Header::CURRENT.to_bytes());

		value.encode_to(self)?;

		self.writer.write_all(&self.buf)?;
		debug!("encoded {} bytes ({} symbols)", self.buf.len(), self.symbols.len());
		Ok(())
	}

	pub fn into_inner(self) -> W {
		self.writer
	}

	fn write_bool(&mut self, value: bool) {
		self.buf.push(if value { Tag::True.byte() } else { Tag::False.byte() });
	}

	/// Write an integer, switching to the bignum form outside the fixnum range.
	fn write_integer(&mut self, value: i64) -> Result<()> {
		if (FIXNUM_MIN..=FIXNUM_MAX).contains(&value) {
			self.buf.push(Tag::Fixnum.byte());
			return write_varint(&mut self.buf, value);
		}
		self.write_bignum(&BigInt::from(value))
	}

	fn write_bignum(&mut self, value: &BigInt) -> Result<()> {
		self.buf.push(Tag::Bignum.byte());
		write_bignum(&mut self.buf, value)
	}

	/// Write text as a UTF-8 annotated string.
	fn write_string(&mut self, text: &str) -> Result<()> {
		self.buf.push(Tag::Ivar.byte());
		self.buf.push(Tag::RawString.byte());
		self.write_bytes(text.as_bytes())?;
		write_varint(&mut self.buf, 1)?;
		self.write_symbol(Encoding::UTF8_MARKER.as_bytes())?;
		self.write_bool(true);
		Ok(())
	}

	/// Write a symbol, or a link to it when already written in this stream.
	fn write_symbol(&mut self, name: &[u8]) -> Result<()> {
		if let Some(index) = self.symbols.index_of(name) {
			self.buf.push(Tag::SymbolLink.byte());
			return write_len(&mut self.buf, index);
		}

		self.symbols.push(name.into());
		self.buf.push(Tag::Symbol.byte());
		self.write_bytes(name)
	}

	fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
		write_len(&mut self.buf, bytes.len())?;
		self.buf.extend_from_slice(bytes);
		Ok(())
	}

	fn unsupported(&self, tag: Tag) -> MarshalError {
		MarshalError::UnsupportedConstruct {
			construct: tag.name(),
			tag: tag.byte(),
			at: self.buf.len(),
		}
	}
}

impl Encode for bool {
	fn encode_to<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
		encoder.write_bool(*self);
		Ok(())
	}
}

impl Encode for i64 {
	fn encode_to<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
		encoder.write_integer(*self)
	}
}

impl Encode for i32 {
	fn encode_to<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
		encoder.write_integer(i64::from(*self))
	}
}

impl Encode for str {
	fn encode_to<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
		encoder.write_string(self)
	}
}

impl Encode for String {
	fn encode_to<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
		encoder.write_string(self)
	}
}

/// Booleans, integers, and UTF-8 strings carrying only the `E` marker.
///
/// Every other kind is rejected with [`MarshalError::UnsupportedConstruct`].
impl Encode for Value {
	fn encode_to<W: Write>(&self, encoder: &mut Encoder<W>) -> Result<()> {
		match self {
			Value::Bool(value) => value.encode_to(encoder),
			Value::Integer(value) => encoder.write_integer(*value),
			Value::BigInteger(value) => encoder.write_bignum(value),
			Value::Annotated(item) => match (&item.inner, &item.encoding, item.annotations.len()) {
				(Value::RawString(_), Encoding::Utf8, 1) => match item.inner.as_str() {
					Some(text) => encoder.write_string(text),
					None => Err(encoder.unsupported(Tag::Ivar)),
				},
				_ => Err(encoder.unsupported(Tag::Ivar)),
			},
			Value::Nil => Err(encoder.unsupported(Tag::Nil)),
			Value::RawString(_) => Err(encoder.unsupported(Tag::RawString)),
			Value::Symbol(_) => Err(encoder.unsupported(Tag::Symbol)),
			Value::Mapping(_) => Err(encoder.unsupported(Tag::Hash)),
		}
	}
}

/// Encode one value into a fresh byte vector.
pub fn to_vec<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>> {
	let mut encoder = Encoder::new(Vec::new());
	encoder.encode(value)?;
	Ok(encoder.into_inner())
}
