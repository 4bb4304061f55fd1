//! `mpack` CLI — convert between JSON and MessagePack from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode JSON to MessagePack (stdin → stdout, raw bytes)
//! echo '{"name":"Alice","age":30}' | mpack encode > data.msgpack
//!
//! # Encode to hex text instead of raw bytes
//! echo '[1,2,3]' | mpack encode --hex
//!
//! # Decode MessagePack back to JSON
//! mpack decode -i data.msgpack --pretty
//!
//! # Show the decoded tree with wire types visible
//! mpack dump -i data.msgpack
//!
//! # Compare JSON and MessagePack sizes
//! mpack stats -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mpack_core::Value;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mpack", version, about = "MessagePack <-> JSON CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log codec activity to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSON to MessagePack
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Write hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },
    /// Decode MessagePack to JSON, one document per encoded value
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Input is hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print decoded values in diagnostic notation
    Dump {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Input is hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },
    /// Show encoding statistics (JSON vs MessagePack size)
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Encode { input, output, hex } => {
            let json = read_text(input.as_deref())?;
            let value = Value::from_json_str(&json).context("Failed to parse JSON input")?;
            let bytes = mpack_core::encode(&value).context("Failed to encode MessagePack")?;
            tracing::debug!(bytes = bytes.len(), "encoded document");
            if hex {
                write_output(output.as_deref(), to_hex(&bytes).as_bytes())?;
            } else {
                write_output(output.as_deref(), &bytes)?;
            }
        }
        Commands::Decode {
            input,
            output,
            hex,
            pretty,
        } => {
            let bytes = read_binary(input.as_deref(), hex)?;
            let values =
                mpack_core::decode_all(&bytes).context("Failed to decode MessagePack input")?;
            tracing::debug!(values = values.len(), "decoded stream");
            let mut out = String::new();
            for value in &values {
                let json = if pretty {
                    value.to_json_string_pretty()
                } else {
                    value.to_json_string()
                }
                .context("Failed to render value as JSON")?;
                out.push_str(&json);
                out.push('\n');
            }
            write_output(output.as_deref(), out.as_bytes())?;
        }
        Commands::Dump { input, hex } => {
            let bytes = read_binary(input.as_deref(), hex)?;
            let values =
                mpack_core::decode_all(&bytes).context("Failed to decode MessagePack input")?;
            let mut out = String::new();
            for value in &values {
                out.push_str(&value.to_string());
                out.push('\n');
            }
            write_output(None, out.as_bytes())?;
        }
        Commands::Stats { input } => {
            let json = read_text(input.as_deref())?;
            let value = Value::from_json_str(&json).context("Failed to parse JSON input")?;
            let compact = value.to_json_string().context("Failed to render JSON")?;
            let packed = mpack_core::encode(&value).context("Failed to encode MessagePack")?;
            let json_bytes = compact.len();
            let packed_bytes = packed.len();
            let ratio = if json_bytes > 0 {
                (1.0 - (packed_bytes as f64 / json_bytes as f64)) * 100.0
            } else {
                0.0
            };
            let report = format!(
                "JSON size:     {json_bytes} bytes\nMsgPack size:  {packed_bytes} bytes\nReduction:     {ratio:.1}%\n"
            );
            write_output(None, report.as_bytes())?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_bytes(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn read_text(path: Option<&str>) -> Result<String> {
    let bytes = read_bytes(path)?;
    String::from_utf8(bytes).context("Input is not valid UTF-8")
}

fn read_binary(path: Option<&str>, hex: bool) -> Result<Vec<u8>> {
    let bytes = read_bytes(path)?;
    if !hex {
        return Ok(bytes);
    }
    let text = String::from_utf8(bytes).context("Hex input is not valid UTF-8")?;
    from_hex(&text)
}

fn write_output(path: Option<&str>, content: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content)
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = hex::encode(bytes);
    out.push('\n');
    out
}

/// Parse hex text, ignoring ASCII whitespace between digits.
fn from_hex(text: &str) -> Result<Vec<u8>> {
    let digits: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    hex::decode(&digits).context("Invalid hex input")
}
