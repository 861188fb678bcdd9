use std::io::{ErrorKind, Read};

use crate::marshal::{MarshalError, Result};

/// Checked, offset-tracking reader over a byte source.
pub struct ByteReader<R> {
	inner: R,
	pos: usize,
}

impl<R: Read> ByteReader<R> {
	/// Create a reader at offset 0.
	pub fn new(inner: R) -> Self {
		Self { inner, pos: 0 }
	}

	/// Return number of bytes consumed so far.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		let mut buf = [0_u8; 1];
		match self.inner.read_exact(&mut buf) {
			Ok(()) => {
				self.pos += 1;
				Ok(buf[0])
			}
			Err(err) if err.kind() == ErrorKind::UnexpectedEof => Err(MarshalError::TruncatedInput {
				at: self.pos,
				need: 1,
				got: 0,
			}),
			Err(err) => Err(err.into()),
		}
	}

	/// Read one byte as a signed quantity.
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(self.read_u8()? as i8)
	}

	/// Read exactly `n` bytes and advance.
	///
	/// The buffer grows with the data actually read, so a bogus length prefix
	/// cannot force a large allocation.
	pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
		let mut out = Vec::new();
		let got = (&mut self.inner).take(n as u64).read_to_end(&mut out)?;
		if got < n {
			let at = self.pos;
			self.pos += got;
			return Err(MarshalError::TruncatedInput { at, need: n, got });
		}

		self.pos += n;
		Ok(out)
	}

	/// Return `true` when the source has no further bytes.
	///
	/// Consumes one byte when the source is not exhausted.
	pub fn at_end(&mut self) -> Result<bool> {
		let mut buf = [0_u8; 1];
		loop {
			match self.inner.read(&mut buf) {
				Ok(0) => return Ok(true),
				Ok(_) => return Ok(false),
				Err(err) if err.kind() == ErrorKind::Interrupted => continue,
				Err(err) => return Err(err.into()),
			}
		}
	}
}

#[cfg(test)]
mod tests;
