//! Convert one saved LinkedIn activity page into an Excel workbook.
//!
//! ```text
//! activity_to_xlsx "Activity | Jane Doe | LinkedIn.html"
//! activity_to_xlsx page.html -m comments -o comments.xlsx
//! ```
//!
//! Set `RUST_LOG=debug` to see what the extractor found.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use linkedin_activity_export::{encoding, Mode, Options, Session};

#[derive(Parser)]
#[command(name = "activity_to_xlsx")]
#[command(about = "LinkedIn activity page (saved HTML) → Excel")]
#[command(version)]
struct Cli {
    /// Path to one saved .html file
    input: PathBuf,

    /// Export mode; detected from the page when omitted
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Output .xlsx filename; defaults to social_{mode}_{timestamp}_{person}.xlsx
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep repeated (comment, date) rows
    #[arg(long)]
    keep_duplicates: bool,

    /// Worksheet name
    #[arg(long, default_value = linkedin_activity_export::DEFAULT_SHEET_NAME)]
    sheet: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let bytes = fs::read(&cli.input)
        .with_context(|| format!("Failed to read input file: {}", cli.input.display()))?;
    let html = encoding::transcode_to_utf8(&bytes);

    let options = Options {
        mode: cli.mode,
        deduplicate_comments: !cli.keep_duplicates,
        sheet_name: cli.sheet,
        ..Options::default()
    };

    let mut session = Session::new(options);
    let download = session
        .run(&html, &cli.input.to_string_lossy())
        .context("Conversion failed")?;

    let out = cli.output.unwrap_or_else(|| PathBuf::from(&download.filename));
    fs::write(&out, &download.bytes)
        .with_context(|| format!("Failed to write output file: {}", out.display()))?;

    println!("Saved → {} ({} {} rows)", out.display(), download.rows, download.mode);
    Ok(())
}
