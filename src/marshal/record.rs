use num_bigint::BigInt;

use crate::marshal::{Location, MarshalError, Result, Value};

/// Something a decoded value can be assigned into.
///
/// Scalars require an exact kind match; records walk their field table.
pub trait MapTarget {
	/// Overwrite `self` from `value`.
	fn assign(&mut self, value: &Value) -> Result<()>;
}

/// Static description of one record field.
pub struct FieldSpec<R> {
	/// Rust field name.
	pub name: &'static str,
	/// Key looked up in the decoded mapping.
	pub key: &'static str,
	/// Assign a looked-up value into the field.
	pub assign: fn(&mut R, &Value) -> Result<()>,
}

/// A struct populated from a decoded mapping.
///
/// Implemented through [`marshal_record!`](crate::marshal_record).
pub trait Record: MapTarget + Sized + 'static {
	/// Field bindings in declaration order.
	const FIELDS: &'static [FieldSpec<Self>];
}

/// Populate `record` from a mapping value.
///
/// Missing keys and `nil` values leave fields untouched.
pub fn map_record<R: Record>(record: &mut R, value: &Value) -> Result<()> {
	let mapping = value.as_mapping().ok_or_else(|| mismatch("mapping", value))?;

	for field in R::FIELDS {
		let Some(item) = mapping.get(field.key) else {
			continue;
		};
		if item.is_nil() {
			continue;
		}
		(field.assign)(record, item).map_err(|err| err.within_field(field.key))?;
	}
	Ok(())
}

fn mismatch(expected: &'static str, value: &Value) -> MarshalError {
	MarshalError::TypeMismatch {
		expected,
		got: value.kind(),
		location: Location::Root,
	}
}

impl MapTarget for bool {
	fn assign(&mut self, value: &Value) -> Result<()> {
		*self = value.as_bool().ok_or_else(|| mismatch("boolean", value))?;
		Ok(())
	}
}

impl MapTarget for i64 {
	fn assign(&mut self, value: &Value) -> Result<()> {
		*self = value.as_i64().ok_or_else(|| mismatch("integer", value))?;
		Ok(())
	}
}

impl MapTarget for BigInt {
	fn assign(&mut self, value: &Value) -> Result<()> {
		*self = value.as_bigint().ok_or_else(|| mismatch("bignum", value))?.clone();
		Ok(())
	}
}

impl MapTarget for String {
	fn assign(&mut self, value: &Value) -> Result<()> {
		if !value.is_string_like() {
			return Err(mismatch("string", value));
		}
		let text = value.as_str().ok_or(MarshalError::TypeMismatch {
			expected: "utf-8 string",
			got: "non-utf-8 string",
			location: Location::Root,
		})?;
		text.clone_into(self);
		Ok(())
	}
}

impl MapTarget for Vec<u8> {
	fn assign(&mut self, value: &Value) -> Result<()> {
		let bytes = value.as_bytes().ok_or_else(|| mismatch("string", value))?;
		bytes.clone_into(self);
		Ok(())
	}
}

impl MapTarget for Value {
	fn assign(&mut self, value: &Value) -> Result<()> {
		*self = value.clone();
		Ok(())
	}
}

impl<T: MapTarget + Default> MapTarget for Option<T> {
	fn assign(&mut self, value: &Value) -> Result<()> {
		match self {
			Some(item) => item.assign(value),
			None => {
				let mut item = T::default();
				item.assign(value)?;
				*self = Some(item);
				Ok(())
			}
		}
	}
}

impl<T: MapTarget + ?Sized> MapTarget for Box<T> {
	fn assign(&mut self, value: &Value) -> Result<()> {
		(**self).assign(value)
	}
}

/// Declare a struct together with its [`Record`](crate::marshal::Record) field table.
///
/// ```
/// rbmarshal::marshal_record! {
/// 	#[derive(Debug, Default)]
/// 	pub struct RedisConf {
/// 		pub host: String => "host",
/// 		pub db: i64 => "db",
/// 	}
/// }
///
/// let bytes = [
/// 	0x04, 0x08, 0x7b, 0x07, 0x3a, 0x09, b'h', b'o', b's', b't', 0x49, 0x22, 0x0e, b'l', b'o', b'c', b'a', b'l', b'h', b'o', b's', b't', 0x06, 0x3a, 0x06,
/// 	0x45, 0x54, 0x3a, 0x07, b'd', b'b', 0x69, 0x06,
/// ];
/// let conf: RedisConf = rbmarshal::marshal::from_slice_into(&bytes).unwrap();
/// assert_eq!(conf.host, "localhost");
/// assert_eq!(conf.db, 1);
/// ```
#[macro_export]
macro_rules! marshal_record {
	(
		$(#[$meta:meta])*
		$vis:vis struct $name:ident {
			$(
				$(#[$field_meta:meta])*
				$field_vis:vis $field:ident : $ty:ty => $key:literal
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		$vis struct $name {
			$(
				$(#[$field_meta])*
				$field_vis $field: $ty,
			)*
		}

		impl $crate::marshal::Record for $name {
			const FIELDS: &'static [$crate::marshal::FieldSpec<Self>] = &[
				$(
					$crate::marshal::FieldSpec {
						name: stringify!($field),
						key: $key,
						assign: |record: &mut $name, value: &$crate::marshal::Value| $crate::marshal::MapTarget::assign(&mut record.$field, value),
					},
				)*
			];
		}

		impl $crate::marshal::MapTarget for $name {
			fn assign(&mut self, value: &$crate::marshal::Value) -> $crate::marshal::Result<()> {
				$crate::marshal::map_record(self, value)
			}
		}
	};
}
