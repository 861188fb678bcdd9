/// Decode and pretty-print command.
pub mod dump;
/// Scalar and string encode command.
pub mod encode;
/// Structural trace command.
pub mod trace;
/// Shared input loading and output helpers.
pub mod util;
