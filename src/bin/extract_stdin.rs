//! Simple CLI that reads a saved activity page from stdin and prints one JSON
//! object per record to stdout.
//!
//! ```text
//! extract_stdin < page.html
//! extract_stdin --mode comments < page.html
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use linkedin_activity_export::{extract_with_options, Mode, Options, Records};

#[derive(Parser)]
#[command(name = "extract_stdin")]
#[command(about = "Saved LinkedIn activity HTML on stdin → JSON lines on stdout")]
struct Cli {
    /// Export mode; detected from the page when omitted
    #[arg(short, long)]
    mode: Option<Mode>,
}

fn print_lines<T: Serialize>(rows: &[T]) -> Result<()> {
    for row in rows {
        println!("{}", serde_json::to_string(row).context("Failed to serialize record")?);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut html = String::new();
    io::stdin()
        .read_to_string(&mut html)
        .context("Failed to read from stdin")?;

    let options = Options {
        mode: cli.mode,
        ..Options::default()
    };

    match extract_with_options(&html, &options)? {
        Records::Posts(rows) => print_lines(&rows),
        Records::Comments(rows) => print_lines(&rows),
    }
}
