//! CLI tool for extracting a document model from PowerPoint files.

use anyhow::{Context, Result};
use clap::Parser;
use deck_core::Document;
use deck_pptx::{PptxParser, SlideFailurePolicy, ZipPackage};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Extract slide size, theme colors, text, shapes, and images from a .pptx file as JSON.
#[derive(Parser, Debug)]
#[command(name = "deck-extract")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file (.pptx)
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,

    /// Keep going when a slide fails, flagging it instead of aborting
    #[arg(long)]
    isolate_failures: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let document = extract(&args.input, &args)?;

    if args.verbose {
        eprintln!(
            "  Found {} slides, {} text runs",
            document.slides.len(),
            document.all_text().len()
        );
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_json(BufWriter::new(file), &document, args.pretty)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            if args.verbose {
                eprintln!("Written to: {}", path.display());
            }
        }
        None => {
            write_json(std::io::stdout().lock(), &document, args.pretty)
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Parse a single PowerPoint file.
fn extract(input_path: &Path, args: &Args) -> Result<Document> {
    if args.verbose {
        eprintln!("Processing: {}", input_path.display());
    }

    let file = File::open(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;
    let package = ZipPackage::new(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    let policy = if args.isolate_failures {
        SlideFailurePolicy::Isolate
    } else {
        SlideFailurePolicy::Abort
    };
    let parser = PptxParser::new().with_failure_policy(policy);

    let document = futures::executor::block_on(parser.parse(&package))
        .with_context(|| format!("Failed to extract {}", input_path.display()))?;

    for slide in document.failed_slides() {
        log::warn!(
            "Slide {} failed: {}",
            slide.number,
            slide.error.as_deref().unwrap_or_default()
        );
    }

    Ok(document)
}

/// Serialize the document as JSON followed by a newline.
fn write_json<W: Write>(mut writer: W, document: &Document, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, document)?;
    } else {
        serde_json::to_writer(&mut writer, document)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
