//! GGUF container inspector.
//!
//! Reads the structural portion of a GGUF file (header, metadata dictionary,
//! tensor index) and reports what it found. Tensor payload bytes are never
//! read; the file is memory-mapped so inspecting a multi-gigabyte model
//! touches only its first pages.
//!
//! # Usage
//!
//! ```bash
//! # Summary: version, counts, alignment, data-segment start
//! ggufdump model.gguf
//!
//! # Include every metadata entry and tensor descriptor
//! ggufdump model.gguf --metadata --tensors
//!
//! # Machine-readable output
//! ggufdump model.gguf --json
//! ```

mod report;

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use ggufdump_core::GgufDocument;
use tracing::info;

/// Inspect GGUF model containers without loading tensor data
#[derive(Parser, Debug)]
#[command(name = "ggufdump")]
#[command(about = "Inspect GGUF model containers without loading tensor data")]
#[command(version)]
struct Args {
    /// GGUF file to inspect
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Emit the whole document as JSON
    #[arg(long)]
    json: bool,

    /// List every metadata entry
    #[arg(long)]
    metadata: bool,

    /// List every tensor descriptor
    #[arg(long)]
    tensors: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn setup_logging(log_level: Option<&str>) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.unwrap_or("info")));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.log_level.as_deref());

    let file =
        File::open(&args.file).with_context(|| format!("cannot open {}", args.file.display()))?;
    let file_size = file.metadata()?.len();
    // SAFETY: read-only mapping; the file is never mutated while mapped.
    let mmap = unsafe { memmap2::Mmap::map(&file) }
        .with_context(|| format!("mmap failed for {}", args.file.display()))?;

    let started = Instant::now();
    let doc = GgufDocument::decode(&mmap)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        tensors = doc.tensors.len(),
        metadata = doc.metadata.len(),
        "decoded document structure"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    print!("{}", report::render(&args.file, file_size, &doc, args.metadata, args.tensors));
    Ok(())
}
