use rbmarshal::marshal::{DecodeOptions, Result};

use crate::cmd::util::{InputArgs, load_input};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: InputArgs,
	/// Maximum nesting followed before giving up.
	#[arg(long, default_value_t = 64)]
	pub max_depth: u32,
}

/// Print the tag structure of one stream.
pub fn run(args: Args) -> Result<()> {
	let Args { input, max_depth } = args;

	let file = load_input(&input)?;
	let options = DecodeOptions {
		max_depth,
		..DecodeOptions::default()
	};
	file.trace(std::io::stdout().lock(), &options)
}
