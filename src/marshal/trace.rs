use std::fmt;
use std::io::{Read, Write};

use crate::marshal::bignum::read_bignum;
use crate::marshal::bytes::ByteReader;
use crate::marshal::tag::Tag;
use crate::marshal::varint::{read_len, read_varint};
use crate::marshal::{DecodeOptions, Header, MarshalError, Result, SymbolTable};

const INDENT: usize = 4;
const MAX_BIGNUM_DIGITS: usize = 200;

/// Write a structural trace of a marshal stream without building values.
///
/// Unlike the value decoder this walks arrays, objects, regexps, classes and
/// modules, so it can describe streams the decoder rejects.
pub fn trace<R: Read, W: Write>(source: R, out: W, options: &DecodeOptions) -> Result<()> {
	let mut tracer = Tracer {
		reader: ByteReader::new(source),
		out,
		depth: 0,
		max_depth: options.max_depth,
		symbols: SymbolTable::new(),
	};

	let header = Header::read(&mut tracer.reader)?;
	tracer.line(format_args!("version {}.{}", header.major, header.minor))?;
	tracer.next()
}

struct Tracer<R, W> {
	reader: ByteReader<R>,
	out: W,
	depth: u32,
	max_depth: u32,
	symbols: SymbolTable,
}

impl<R: Read, W: Write> Tracer<R, W> {
	fn line(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
		let pad = self.depth as usize * INDENT;
		writeln!(self.out, "{:pad$}{args}", "")?;
		Ok(())
	}

	fn nested(&mut self, open: fmt::Arguments<'_>, close: &str, body: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
		self.line(open)?;
		if self.depth + 1 >= self.max_depth {
			return Err(MarshalError::DepthExceeded { max_depth: self.max_depth });
		}
		self.depth += 1;
		body(self)?;
		self.depth -= 1;
		self.line(format_args!("{close}"))
	}

	fn pairs(&mut self, count: usize) -> Result<()> {
		for _ in 0..count {
			self.next()?;
			self.next()?;
		}
		Ok(())
	}

	fn bytes(&mut self) -> Result<Vec<u8>> {
		let len = read_len(&mut self.reader)?;
		self.reader.read_bytes(len)
	}

	fn next(&mut self) -> Result<()> {
		let at = self.reader.pos();
		let byte = self.reader.read_u8()?;
		let tag = Tag::from_byte(byte).ok_or(MarshalError::UnknownTag { tag: byte, at })?;

		match tag {
			Tag::Nil | Tag::True | Tag::False => self.line(format_args!("{}", tag.name())),
			Tag::Fixnum => {
				let value = read_varint(&mut self.reader)?;
				self.line(format_args!("fixnum {value}"))
			}
			Tag::RawString => {
				let bytes = self.bytes()?;
				self.line(format_args!("raw_string len={} {:?}", bytes.len(), String::from_utf8_lossy(&bytes)))
			}
			Tag::Symbol => {
				let name = self.bytes()?;
				self.line(format_args!("symbol {:?}", String::from_utf8_lossy(&name)))?;
				self.symbols.push(name.into());
				Ok(())
			}
			Tag::SymbolLink => {
				let index = read_varint(&mut self.reader)?;
				match self.symbols.get(index).cloned() {
					Some(name) => self.line(format_args!("symbol_link #{index} -> {:?}", String::from_utf8_lossy(&name))),
					None => self.line(format_args!("symbol_link #{index} -> <unresolved>")),
				}
			}
			Tag::ObjectLink => {
				let index = read_varint(&mut self.reader)?;
				self.line(format_args!("object_link #{index}"))
			}
			Tag::Ivar => self.nested(format_args!("ivar {{"), "}", |tracer| {
				tracer.next()?;
				let count = read_len(&mut tracer.reader)?;
				tracer.line(format_args!("ivar_count = {count}"))?;
				tracer.pairs(count)
			}),
			Tag::Array => {
				let size = read_len(&mut self.reader)?;
				self.nested(format_args!("array size={size} ["), "]", |tracer| {
					for _ in 0..size {
						tracer.next()?;
					}
					Ok(())
				})
			}
			Tag::Object => self.nested(format_args!("object {{"), "}", |tracer| {
				tracer.next()?;
				let count = read_len(&mut tracer.reader)?;
				tracer.line(format_args!("ivar_count = {count}"))?;
				tracer.pairs(count)
			}),
			Tag::Hash => {
				let size = read_len(&mut self.reader)?;
				self.nested(format_args!("hash size={size} {{"), "}", |tracer| tracer.pairs(size))
			}
			Tag::Bignum => {
				let digits = read_bignum(&mut self.reader)?.to_string();
				if digits.len() > MAX_BIGNUM_DIGITS {
					self.line(format_args!("bignum ({}...)", &digits[..MAX_BIGNUM_DIGITS]))
				} else {
					self.line(format_args!("bignum {digits}"))
				}
			}
			Tag::Regexp => {
				let pattern = self.bytes()?;
				let options = self.reader.read_u8()?;
				self.line(format_args!("regexp pattern={:?} options={options}", String::from_utf8_lossy(&pattern)))
			}
			Tag::Class | Tag::Module => {
				let name = self.bytes()?;
				self.line(format_args!("{} {:?}", tag.name(), String::from_utf8_lossy(&name)))
			}
		}
	}
}

#[cfg(test)]
mod tests;
