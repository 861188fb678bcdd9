use std::fmt::Write;

use rbmarshal::marshal::{DecodeOptions, Mapping, Result, Value};

use crate::cmd::util::{InputArgs, emit_json, load_input, truncate};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub input: InputArgs,
	#[arg(long)]
	pub json: bool,
	/// Maximum nesting accepted by the decoder.
	#[arg(long, default_value_t = 64)]
	pub max_depth: u32,
}

/// Output truncation and formatting limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of bytes printed for non-UTF-8 strings.
	pub max_bytes: usize,
	/// Maximum number of entries printed for a single mapping.
	pub max_entries: usize,
	/// Maximum recursive print depth for nested mappings.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_string_len: 200,
			max_bytes: 64,
			max_entries: 80,
			max_print_depth: 8,
		}
	}
}

/// Decode one stream and print it.
pub fn run(args: Args) -> Result<()> {
	let Args { input, json, max_depth } = args;

	let file = load_input(&input)?;
	let options = DecodeOptions {
		max_depth,
		..DecodeOptions::default()
	};
	let value = file.decode_with(options)?;
	let version = format!("{}.{}", file.header.major, file.header.minor);

	if json {
		return emit_json(&DumpJson {
			version,
			kind: value.kind(),
			value: &value,
		});
	}

	println!("version: {version}");
	println!("kind: {}", value.kind());
	println!("value:");
	let mut out = String::new();
	render_value(&mut out, &value, 2, 0, PrintOptions::default());
	print!("{out}");

	Ok(())
}

#[derive(serde::Serialize)]
struct DumpJson<'a> {
	version: String,
	kind: &'static str,
	value: &'a Value,
}

/// Render a value as indented text, one line per scalar or mapping entry.
pub(crate) fn render_value(out: &mut String, value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Mapping(mapping) => render_mapping(out, mapping, indent, depth, options),
		Value::Annotated(item) if !matches!(item.inner, Value::RawString(_)) => {
			render_value(out, &item.inner, indent, depth, options);
			for (name, annotation) in &item.annotations {
				let _ = writeln!(out, "{pad}  @{name} = {}", render_inline(annotation, options));
			}
		}
		other => {
			let _ = writeln!(out, "{pad}{}", render_inline(other, options));
		}
	}
}

fn render_mapping(out: &mut String, mapping: &Mapping, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	if depth >= options.max_print_depth {
		let _ = writeln!(out, "{pad}{{ ... {} entries }}", mapping.len());
		return;
	}

	let _ = writeln!(out, "{pad}{{");
	for (key, value) in mapping.iter().take(options.max_entries) {
		let key = render_inline(key, options);
		if matches!(value, Value::Mapping(_)) {
			let _ = writeln!(out, "{pad}  {key} =>");
			render_value(out, value, indent + 4, depth + 1, options);
		} else {
			let _ = write!(out, "{pad}  {key} => ");
			render_value(out, value, 0, depth + 1, options);
		}
	}
	if mapping.len() > options.max_entries {
		let _ = writeln!(out, "{pad}  ... {} more entries", mapping.len() - options.max_entries);
	}
	let _ = writeln!(out, "{pad}}}");
}

fn render_inline(value: &Value, options: PrintOptions) -> String {
	match value {
		Value::Nil => "nil".to_owned(),
		Value::Bool(value) => value.to_string(),
		Value::Integer(value) => value.to_string(),
		Value::BigInteger(value) => format!("{value} (bignum)"),
		Value::RawString(bytes) => render_bytes(bytes, options),
		Value::Symbol(name) => format!(":{}", String::from_utf8_lossy(name)),
		Value::Annotated(item) if item.inner.is_string_like() => format!("{} ({})", render_inline(&item.inner, options), item.encoding),
		Value::Annotated(item) => item.inner.kind().to_owned(),
		Value::Mapping(mapping) => format!("{{ ... {} entries }}", mapping.len()),
	}
}

fn render_bytes(bytes: &[u8], options: PrintOptions) -> String {
	match std::str::from_utf8(bytes) {
		Ok(text) => format!("{:?}", truncate(text, options.max_string_len)),
		Err(_) if bytes.len() > options.max_bytes => format!("bytes[{}] {}...", bytes.len(), hex::encode(&bytes[..options.max_bytes])),
		Err(_) => format!("bytes[{}] {}", bytes.len(), hex::encode(bytes)),
	}
}
