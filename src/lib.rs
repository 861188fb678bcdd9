//! Public library API for reading and writing Ruby `Marshal` 4.8 streams.

/// Marshal header validation, value decoding, record mapping, and primitive encoding.
pub mod marshal;
