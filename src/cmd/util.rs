use std::io::Read;
use std::path::PathBuf;

use log::debug;
use rbmarshal::marshal::{MarshalFile, Result};

/// Where a command reads its stream from.
#[derive(clap::Args)]
pub struct InputArgs {
	/// File holding a marshal stream. Reads stdin when omitted.
	pub path: Option<PathBuf>,
	/// Stream given inline as hex digits.
	#[arg(long, conflicts_with = "path")]
	pub hex: Option<String>,
}

/// Load the selected input and validate its header.
pub(crate) fn load_input(input: &InputArgs) -> Result<MarshalFile> {
	if let Some(text) = &input.hex {
		let digits: String = text.chars().filter(|ch| !ch.is_ascii_whitespace()).collect();
		return MarshalFile::from_bytes(hex::decode(digits)?);
	}

	if let Some(path) = &input.path {
		return MarshalFile::open(path);
	}

	let mut raw = Vec::new();
	std::io::stdin().lock().read_to_end(&mut raw)?;
	debug!("read {} bytes from stdin", raw.len());
	MarshalFile::from_bytes(raw)
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(value: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
	println!("{text}");
	Ok(())
}

/// Truncate text to `max_len` Unicode scalar values.
pub(crate) fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}
