#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use env_logger::Env;

mod cmd;

#[derive(Parser)]
#[command(name = "rbmarshal", about = "Ruby Marshal 4.8 inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Decode a stream and print the value.
	Dump(cmd::dump::Args),
	/// Print the tag structure of a stream.
	Trace(cmd::trace::Args),
	/// Encode a scalar or string.
	Encode(cmd::encode::Args),
}

fn main() {
	env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> rbmarshal::marshal::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Dump(args) => cmd::dump::run(args),
		Commands::Trace(args) => cmd::trace::run(args),
		Commands::Encode(args) => cmd::encode::run(args),
	}
}
