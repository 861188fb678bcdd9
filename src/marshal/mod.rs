mod bignum;
mod bytes;
mod decode;
mod encode;
mod error;
mod file;
mod header;
mod record;
mod tables;
mod tag;
mod trace;
mod value;
mod varint;

/// Checked byte reader shared by the decoder and the tracer.
pub use bytes::ByteReader;
/// Value decoding entry points and options.
pub use decode::{DecodeOptions, Decoder, from_reader, from_slice, from_slice_into};
/// Primitive encoding entry points.
pub use encode::{Encode, Encoder, to_vec};
/// Error and result aliases.
pub use error::{Location, MarshalError, Result};
/// In-memory input abstraction.
pub use file::MarshalFile;
/// Stream version header.
pub use header::Header;
/// Record mapping traits and helpers.
pub use record::{FieldSpec, MapTarget, Record, map_record};
/// Per-session backreference tables.
pub use tables::{ObjectTable, SymbolTable};
/// Structural stream trace.
pub use trace::trace;
/// Decoded value types.
pub use value::{Annotated, Encoding, Mapping, Value};
/// Fixnum envelope bounds.
pub use varint::{FIXNUM_MAX, FIXNUM_MIN};
