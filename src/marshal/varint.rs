use std::io::Read;

use crate::marshal::bytes::ByteReader;
use crate::marshal::{MarshalError, Result};

/// Smallest integer the fixnum form can carry.
pub const FIXNUM_MIN: i64 = -0x4000_0000;
/// Largest integer the fixnum form can carry.
pub const FIXNUM_MAX: i64 = 0x3fff_ffff;

/// Decode one variable-length signed integer.
pub fn read_varint<R: Read>(reader: &mut ByteReader<R>) -> Result<i64> {
	let c = reader.read_i8()?;
	match c {
		0 => Ok(0),
		6..=127 => Ok(i64::from(c) - 5),
		-128..=-6 => Ok(i64::from(c) + 5),
		1..=5 => {
			let bytes = reader.read_bytes(c as usize)?;
			let mut value = 0_i64;
			for (i, byte) in bytes.iter().enumerate() {
				value |= i64::from(*byte) << (8 * i);
			}
			Ok(value)
		}
		_ => {
			let bytes = reader.read_bytes(usize::from(c.unsigned_abs()))?;
			let mut value = -1_i64;
			for (i, byte) in bytes.iter().enumerate() {
				value &= !(0xff_i64 << (8 * i));
				value |= i64::from(*byte) << (8 * i);
			}
			Ok(value)
		}
	}
}

/// Decode a varint that must be a non-negative length or count.
pub fn read_len<R: Read>(reader: &mut ByteReader<R>) -> Result<usize> {
	let at = reader.pos();
	let len = read_varint(reader)?;
	usize::try_from(len).map_err(|_| MarshalError::InvalidLength { len, at })
}

/// Append the varint form of `value` to `out`.
pub fn write_varint(out: &mut Vec<u8>, value: i64) -> Result<()> {
	if !(FIXNUM_MIN..=FIXNUM_MAX).contains(&value) {
		return Err(MarshalError::IntegerOutOfRange { value });
	}

	match value {
		0 => out.push(0),
		1..=122 => out.push((value + 5) as u8),
		-123..=-1 => out.push((value - 5) as i8 as u8),
		_ => {
			let len = byte_len(value);
			let marker = if value < 0 { -(len as i8) } else { len as i8 };
			out.push(marker as u8);
			for i in 0..len {
				out.push((value >> (8 * i)) as u8);
			}
		}
	}
	Ok(())
}

/// Append a non-negative length prefix.
pub fn write_len(out: &mut Vec<u8>, len: usize) -> Result<()> {
	let value = i64::try_from(len).map_err(|_| MarshalError::IntegerOutOfRange { value: i64::MAX })?;
	write_varint(out, value)
}

fn byte_len(value: i64) -> usize {
	let mut len = 0;
	let mut rest = value;
	loop {
		rest >>= 8;
		len += 1;
		if rest == 0 || rest == -1 {
			return len;
		}
	}
}
