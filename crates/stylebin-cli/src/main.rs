//! stylebin - Convert JSON map styles into the binary style format
//!
//! This tool reads a style document (buckets, structure, classes) and
//! writes the encoded blob to a file or to standard output.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use stylebin_core::pbf::read_fields;
use stylebin_core::{EncodeMode, EncoderConfig, Style, StyleEncoder};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

/// Convert JSON map styles into the binary style format
#[derive(Parser, Debug)]
#[command(name = "stylebin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Style document to convert ("-" reads standard input)
    input: PathBuf,

    /// Write the blob to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log and omit invalid colors, unsupported layer types and
    /// non-numeric opacity instead of failing
    #[arg(long)]
    lenient: bool,

    /// Accept stops whose zoom levels are not strictly ascending
    #[arg(long)]
    allow_unordered_stops: bool,

    /// Print top-level field counts of the encoded blob to stderr
    #[arg(long)]
    summary: bool,

    /// Overwrite an existing output file
    #[arg(long)]
    force: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn encoder_config(&self) -> EncoderConfig {
        let mode = if self.lenient {
            EncodeMode::Lenient
        } else {
            EncodeMode::Strict
        };
        EncoderConfig::new()
            .mode(mode)
            .validate_stop_order(!self.allow_unordered_stops)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays binary
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    if cli.output.is_none() && io::stdout().is_terminal() {
        bail!("Refusing to write binary output to a terminal (use --output or redirect stdout)");
    }

    let style = load_style(&cli.input)?;
    let blob = convert(cli, &style)?;

    if cli.summary {
        eprint!("{}", summarize(&blob)?);
    }

    match &cli.output {
        Some(path) => {
            write_output(path, &blob, cli.force)?;
            info!("Wrote {} bytes to {}", blob.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&blob)
                .and_then(|()| stdout.flush())
                .context("Failed to write to standard output")?;
        }
    }

    Ok(())
}

/// Load a style document from a file or standard input
fn load_style(input: &Path) -> Result<Style> {
    if input == Path::new("-") {
        debug!("Reading style from standard input");
        let mut json = String::new();
        io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read standard input")?;
        return Style::from_json_str(&json).context("Failed to parse style from standard input");
    }

    if !input.is_file() {
        bail!("Input file does not exist: {}", input.display());
    }
    debug!("Reading style from {}", input.display());
    Style::from_file(input).with_context(|| format!("Failed to load style: {}", input.display()))
}

/// Encode the whole style before anything is written
fn convert(cli: &Cli, style: &Style) -> Result<Vec<u8>> {
    let encoder = StyleEncoder::with_config(cli.encoder_config());
    match encoder.encode_with_stats(style) {
        Ok((blob, stats)) => {
            info!(
                "Encoded {} buckets, {} structure nodes, {} classes ({} fill / {} line layers)",
                stats.buckets, stats.structure_nodes, stats.classes, stats.fill_layers, stats.line_layers
            );
            Ok(blob.to_vec())
        }
        Err(e) if e.is_recoverable() && !cli.lenient => {
            Err(e).context("Failed to encode style (rerun with --lenient to omit invalid entries)")
        }
        Err(e) => Err(e).context("Failed to encode style"),
    }
}

/// Count top-level fields of an encoded blob
fn summarize(blob: &[u8]) -> Result<String> {
    let fields = read_fields(blob).context("Encoded output is not valid protobuf")?;
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for field in &fields {
        *counts.entry(field.tag).or_default() += 1;
    }

    let count = |tag: u32| counts.get(&tag).copied().unwrap_or(0);
    Ok(format!(
        "{} bytes: {} buckets, {} structure roots, {} classes\n",
        blob.len(),
        count(1),
        count(2),
        count(3)
    ))
}

/// Write the blob to disk, refusing to clobber unless forced
fn write_output(path: &Path, blob: &[u8], force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "File already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, blob).with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(())
}
