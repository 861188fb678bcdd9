use std::fs;
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::marshal::bytes::ByteReader;
use crate::marshal::{DecodeOptions, Decoder, Header, MapTarget, Result, Value, trace};

/// A whole marshal stream held in memory with its header already checked.
pub struct MarshalFile {
	pub header: Header,
	bytes: Vec<u8>,
}

impl MarshalFile {
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let raw = fs::read(path)?;
		debug!("read {} bytes from {}", raw.len(), path.display());
		Self::from_bytes(raw)
	}

	/// Wrap raw bytes after validating the header.
	pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
		let header = Header::read(&mut ByteReader::new(&bytes[..]))?;
		Ok(Self { header, bytes })
	}

	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	pub fn decode(&self) -> Result<Value> {
		self.decode_with(DecodeOptions::default())
	}

	pub fn decode_with(&self, options: DecodeOptions) -> Result<Value> {
		Decoder::with_options(&self.bytes[..], options).decode_value()
	}

	/// Decode and map into a typed target.
	pub fn decode_into<T: MapTarget + Default>(&self) -> Result<T> {
		Decoder::new(&self.bytes[..]).decode()
	}

	pub fn trace<W: Write>(&self, out: W, options: &DecodeOptions) -> Result<()> {
		trace(&self.bytes[..], out, options)
	}
}

#[cfg(test)]
mod tests;
