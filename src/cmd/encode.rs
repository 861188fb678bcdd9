use std::fs;
use std::path::PathBuf;

use log::debug;
use rbmarshal::marshal::{Result, Value, to_vec};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub value: ValueArgs,
	/// Write the stream to a file instead of printing hex.
	#[arg(long)]
	pub out: Option<PathBuf>,
}

/// Exactly one value to encode.
#[derive(clap::Args)]
#[group(required = true, multiple = false)]
pub struct ValueArgs {
	#[arg(long, allow_negative_numbers = true)]
	pub int: Option<i64>,
	#[arg(long)]
	pub string: Option<String>,
	#[arg(long = "bool")]
	pub boolean: Option<bool>,
}

/// Encode one value and print or write the stream.
pub fn run(args: Args) -> Result<()> {
	let Args { value, out } = args;

	let bytes = match value {
		ValueArgs { int: Some(number), .. } => to_vec(&number)?,
		ValueArgs { string: Some(text), .. } => to_vec(&text)?,
		ValueArgs { boolean: Some(flag), .. } => to_vec(&flag)?,
		// unreachable through clap, which requires one member of the group
		ValueArgs { .. } => to_vec(&Value::Nil)?,
	};

	match out {
		Some(path) => {
			fs::write(&path, &bytes)?;
			debug!("wrote {} bytes to {}", bytes.len(), path.display());
		}
		None => println!("{}", hex::encode(&bytes)),
	}

	Ok(())
}
