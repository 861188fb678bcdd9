use std::io::Read;
use std::rc::Rc;

use log::{debug, trace};

use crate::marshal::bignum::read_bignum;
use crate::marshal::bytes::ByteReader;
use crate::marshal::record::MapTarget;
use crate::marshal::tag::Tag;
use crate::marshal::varint::{read_len, read_varint};
use crate::marshal::{Annotated, Header, Location, Mapping, MarshalError, ObjectTable, Result, SymbolTable, Value};

/// Runtime limits and behavior switches for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting depth of mappings and annotation wrappers.
	pub max_depth: u32,
	/// Fail when bytes remain after the top-level value.
	pub reject_trailing: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			reject_trailing: false,
		}
	}
}

/// One decode session over a byte source.
///
/// Symbol and object tables live for one stream: `decode_value` resets them
/// when it reads the header.
pub struct Decoder<R> {
	reader: ByteReader<R>,
	options: DecodeOptions,
	header: Option<Header>,
	symbols: SymbolTable,
	objects: ObjectTable,
}

impl<R: Read> Decoder<R> {
	/// Create a decoder with default options.
	pub fn new(source: R) -> Self {
		Self::with_options(source, DecodeOptions::default())
	}

	/// Create a decoder with explicit options.
	pub fn with_options(source: R, options: DecodeOptions) -> Self {
		Self {
			reader: ByteReader::new(source),
			options,
			header: None,
			symbols: SymbolTable::new(),
			objects: ObjectTable::new(),
		}
	}

	/// Read and validate the two-byte header, starting a fresh session.
	pub fn read_header(&mut self) -> Result<Header> {
		self.symbols.clear();
		self.objects.clear();
		self.header = None;

		let header = Header::read(&mut self.reader)?;
		debug!("marshal header {}.{} accepted", header.major, header.minor);
		self.header = Some(header);
		Ok(header)
	}

	/// Decode the header and the single top-level value.
	pub fn decode_value(&mut self) -> Result<Value> {
		self.read_header()?;
		let value = self.read_value(0)?;

		if self.options.reject_trailing {
			let at = self.reader.pos();
			if !self.reader.at_end()? {
				return Err(MarshalError::TrailingBytes { at });
			}
		}

		debug!(
			"decoded {} value from {} bytes ({} symbols, {} objects)",
			value.kind(),
			self.reader.pos(),
			self.symbols.len(),
			self.objects.len()
		);
		Ok(value)
	}

	/// Decode the stream and map it onto `T`.
	///
	/// A `nil` top-level value leaves `T` at its default.
	pub fn decode<T: MapTarget + Default>(&mut self) -> Result<T> {
		let value = self.decode_value()?;
		let mut out = T::default();
		if !value.is_nil() {
			out.assign(&value)?;
		}
		Ok(out)
	}

	/// Header of the current session, once read.
	pub fn header(&self) -> Option<Header> {
		self.header
	}

	/// Symbol table of the current session.
	pub fn symbols(&self) -> &SymbolTable {
		&self.symbols
	}

	/// Object table of the current session.
	pub fn objects(&self) -> &ObjectTable {
		&self.objects
	}

	/// Bytes consumed so far.
	pub fn position(&self) -> usize {
		self.reader.pos()
	}

	fn read_value(&mut self, depth: u32) -> Result<Value> {
		if depth >= self.options.max_depth {
			return Err(MarshalError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}

		let at = self.reader.pos();
		let byte = self.reader.read_u8()?;
		let tag = Tag::from_byte(byte).ok_or(MarshalError::UnknownTag { tag: byte, at })?;
		trace!("tag {} at offset {at} depth {depth}", tag.name());

		match tag {
			Tag::Nil => Ok(Value::Nil),
			Tag::True => Ok(Value::Bool(true)),
			Tag::False => Ok(Value::Bool(false)),
			Tag::Fixnum => Ok(Value::Integer(read_varint(&mut self.reader)?)),
			Tag::RawString => {
				let value = Value::RawString(Rc::from(self.read_string_bytes()?));
				self.objects.push(value.clone());
				Ok(value)
			}
			Tag::Symbol => Ok(Value::Symbol(self.read_symbol()?)),
			Tag::SymbolLink => Ok(Value::Symbol(self.read_symbol_link(at)?)),
			Tag::ObjectLink => self.read_object_link(at),
			Tag::Ivar => self.read_annotated(depth),
			Tag::Hash => self.read_mapping(depth),
			Tag::Bignum => {
				let value = Value::BigInteger(Rc::new(read_bignum(&mut self.reader)?));
				self.objects.push(value.clone());
				Ok(value)
			}
			Tag::Array | Tag::Object | Tag::Regexp | Tag::Class | Tag::Module => Err(MarshalError::UnsupportedConstruct {
				construct: tag.name(),
				tag: byte,
				at,
			}),
		}
	}

	fn read_string_bytes(&mut self) -> Result<Vec<u8>> {
		let len = read_len(&mut self.reader)?;
		self.reader.read_bytes(len)
	}

	fn read_symbol(&mut self) -> Result<Rc<[u8]>> {
		let name: Rc<[u8]> = Rc::from(self.read_string_bytes()?);
		self.symbols.push(Rc::clone(&name));
		Ok(name)
	}

	fn read_symbol_link(&mut self, at: usize) -> Result<Rc<[u8]>> {
		let index = read_varint(&mut self.reader)?;
		self.symbols.get(index).cloned().ok_or(MarshalError::InvalidBackreference {
			table: "symbol",
			index,
			len: self.symbols.len(),
			at,
		})
	}

	fn read_object_link(&mut self, at: usize) -> Result<Value> {
		let index = read_varint(&mut self.reader)?;
		self.objects.get(index).cloned().ok_or(MarshalError::InvalidBackreference {
			table: "object",
			index,
			len: self.objects.len(),
			at,
		})
	}

	fn read_annotated(&mut self, depth: u32) -> Result<Value> {
		let slot = self.objects.len();
		let inner = self.read_value(depth + 1)?;
		let inner_registered = self.objects.len() > slot;

		let count = read_len(&mut self.reader)?;
		let mut annotations = Vec::with_capacity(count.min(16));
		for _ in 0..count {
			let name_at = self.reader.pos();
			let name = match self.read_value(depth + 1)? {
				Value::Symbol(name) => annotation_name(&name, name_at)?,
				other => {
					return Err(MarshalError::TypeMismatch {
						expected: "symbol",
						got: other.kind(),
						location: Location::Offset(name_at),
					});
				}
			};
			let value = self.read_value(depth + 1)?;
			annotations.push((name, value));
		}

		let value = Value::Annotated(Rc::new(Annotated::new(inner, annotations)));
		// The wrapper takes over the slot its inner value opened.
		if inner_registered {
			self.objects.fill(slot, value.clone());
		}
		Ok(value)
	}

	fn read_mapping(&mut self, depth: u32) -> Result<Value> {
		let slot = self.objects.reserve();
		let count = read_len(&mut self.reader)?;

		let mut mapping = Mapping::with_capacity(count.min(1024));
		for _ in 0..count {
			let key_at = self.reader.pos();
			let key = self.read_value(depth + 1)?;
			if !key.is_string_like() {
				return Err(MarshalError::TypeMismatch {
					expected: "string-like key",
					got: key.kind(),
					location: Location::Offset(key_at),
				});
			}
			let value = self.read_value(depth + 1)?;
			mapping.push(key, value);
		}

		let value = Value::Mapping(Rc::new(mapping));
		self.objects.fill(slot, value.clone());
		Ok(value)
	}
}

/// Annotation names are instance variable identifiers and must be UTF-8.
fn annotation_name(name: &[u8], at: usize) -> Result<Rc<str>> {
	std::str::from_utf8(name).map(Rc::from).map_err(|_| MarshalError::InvalidUtf8 { at })
}

/// Decode one marshal stream held in memory.
pub fn from_slice(bytes: &[u8]) -> Result<Value> {
	Decoder::new(bytes).decode_value()
}

/// Decode one marshal stream from a reader.
pub fn from_reader<R: Read>(reader: R) -> Result<Value> {
	Decoder::new(reader).decode_value()
}

/// Decode one in-memory stream and map it onto `T`.
pub fn from_slice_into<T: MapTarget + Default>(bytes: &[u8]) -> Result<T> {
	Decoder::new(bytes).decode()
}
