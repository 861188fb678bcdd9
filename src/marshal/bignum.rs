use std::io::Read;

use num_bigint::{BigInt, Sign};

use crate::marshal::bytes::ByteReader;
use crate::marshal::varint::{read_len, write_len};
use crate::marshal::{MarshalError, Result};

/// Decode a bignum body (everything after the `l` tag).
pub fn read_bignum<R: Read>(reader: &mut ByteReader<R>) -> Result<BigInt> {
	let sign_at = reader.pos();
	let sign = match reader.read_u8()? {
		b'+' => Sign::Plus,
		b'-' => Sign::Minus,
		other => return Err(MarshalError::InvalidBignumSign { sign: other, at: sign_at }),
	};

	// The prefix counts 16-bit words.
	let len_at = reader.pos();
	let words = read_len(reader)?;
	let byte_len = words.checked_mul(2).ok_or(MarshalError::InvalidLength {
		len: words as i64,
		at: len_at,
	})?;

	// Stream order is least significant byte first.
	let magnitude = reader.read_bytes(byte_len)?;
	Ok(BigInt::from_bytes_le(sign, &magnitude))
}

/// Append a bignum body (everything after the `l` tag).
pub fn write_bignum(out: &mut Vec<u8>, value: &BigInt) -> Result<()> {
	let (sign, mut magnitude) = value.to_bytes_le();
	if magnitude.len() % 2 == 1 {
		magnitude.push(0);
	}

	out.push(if sign == Sign::Minus { b'-' } else { b'+' });
	write_len(out, magnitude.len() / 2)?;
	out.extend_from_slice(&magnitude);
	Ok(())
}

#[cfg(test)]
mod tests;
