//! Parses a menu file (OCR text or PDF) and prints the sandwiches as JSON.
//!
//! Usage:
//!   menu-parse <path> [--config <toml>] [--pretty] [--lines] [--verbose]

use anyhow::{Context, bail};
use clap::Parser;
use ebyyard_menu_api::logging::init_logging;
use ebyyard_menu_api::parser::classify::normalize_lines;
use ebyyard_menu_api::source::extract_text;
use ebyyard_menu_api::{AppConfig, ImportError, MenuParser};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "menu-parse", version, about = "Parse a sandwich menu into JSON")]
struct Args {
    /// Text or PDF file holding the menu
    path: PathBuf,
    /// TOML config with parser vocabulary
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    pretty: bool,
    /// Print the normalized input lines to stderr before parsing
    #[arg(long)]
    lines: bool,
    /// Log every parser decision
    #[arg(long, short)]
    verbose: bool,
}

/// The lines the parser sees, numbered in scan order.
fn describe_lines(text: &str) -> Vec<String> {
    normalize_lines(text)
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{}: {:?} (clean {:?})", i, line.text, line.clean))
        .collect()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(if args.verbose { "debug" } else { "warn" });

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    let bytes = fs::read(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let text = extract_text(&bytes, None)?;

    if args.lines {
        for line in describe_lines(&text) {
            eprintln!("{line}");
        }
    }

    let parser = MenuParser::new(&config.parser)?;
    let items = parser.parse(&text);
    if items.is_empty() {
        bail!(ImportError::NoItemsFound);
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&items)?
    } else {
        serde_json::to_string(&items)?
    };
    println!("{json}");
    Ok(())
}
