use std::io::Read;

use crate::marshal::bytes::ByteReader;
use crate::marshal::{MarshalError, Result};

/// Marshal stream version pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
	/// Major format version.
	pub major: u8,
	/// Minor format version.
	pub minor: u8,
}

impl Header {
	/// Only supported major version.
	pub const MAJOR: u8 = 4;
	/// Highest supported minor version.
	pub const MAX_MINOR: u8 = 8;
	/// Version written by the encoder.
	pub const CURRENT: Self = Self {
		major: Self::MAJOR,
		minor: Self::MAX_MINOR,
	};

	/// Consume two bytes and validate them as a header.
	///
	/// Both bytes are consumed before validation, so a rejected stream is
	/// always left two bytes further along.
	pub fn read<R: Read>(reader: &mut ByteReader<R>) -> Result<Self> {
		let major = reader.read_u8()?;
		let minor = reader.read_u8()?;
		Self { major, minor }.validate()
	}

	/// Check the version gate.
	pub fn validate(self) -> Result<Self> {
		if self.major != Self::MAJOR || self.minor > Self::MAX_MINOR {
			return Err(MarshalError::UnsupportedVersion {
				major: self.major,
				minor: self.minor,
			});
		}
		Ok(self)
	}

	/// Wire form of the header.
	pub fn to_bytes(self) -> [u8; 2] {
		[self.major, self.minor]
	}
}

#[cfg(test)]
mod tests;
