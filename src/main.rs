//! Cellgrid - A fixed-size spreadsheet on the command line

mod config;

use anyhow::{Context, Result, bail};
use cellgrid_core::Document;
use cellgrid_engine::engine::Grid;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cellgrid")]
#[command(author, version, about = "Fixed-size spreadsheet with arithmetic formulas")]
struct Cli {
    /// Sheet file to open (missing files start empty)
    file: Option<PathBuf>,

    /// Evaluate a single formula and print its value (leading '=' optional)
    #[arg(short, long, value_name = "EXPR", conflicts_with_all = ["file", "set", "output"])]
    command: Option<String>,

    /// Set a cell before printing, e.g. --set "B1==A1+3" (can be repeated)
    #[arg(short, long, value_name = "LABEL=TEXT")]
    set: Vec<String>,

    /// Print dependency depths instead of values
    #[arg(long)]
    depth: bool,

    /// Save the sheet to FILE after applying edits
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Load settings from this TOML file instead of the user config dir
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of columns (1-26)
    #[arg(long)]
    width: Option<usize>,

    /// Number of rows (1-99)
    #[arg(long)]
    height: Option<usize>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("CELLGRID_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let (config, mut warnings) = config::load_config(cli.config.as_ref());
    let (config, clamped) = config.with_overrides(cli.width, cli.height);
    warnings.extend(clamped);
    for warning in warnings {
        warn!("{}", warning);
    }
    let (width, height) = (config.sheet.width, config.sheet.height);

    if let Some(expr) = cli.command {
        return Ok(run_command(&expr, width, height));
    }

    let mut doc = Document::with_file(cli.file, width, height).context("failed to open sheet")?;

    for edit in &cli.set {
        let Some((label, text)) = edit.split_once('=') else {
            bail!("--set expects LABEL=TEXT, got '{}'", edit);
        };
        doc.set_cell_from_input(label, text)
            .with_context(|| format!("failed to apply --set {}", edit))?;
    }

    for row in doc.listing() {
        let shown = if cli.depth { row.depth.to_string() } else { row.value };
        println!("{}\t{}\t{}", row.cell_ref, row.raw, shown);
    }

    if let Some(path) = cli.output {
        let saved = doc.save_as(&path).context("failed to save sheet")?;
        eprintln!("Saved to {}", saved.display());
    }

    Ok(ExitCode::SUCCESS)
}

/// Evaluate one formula in an otherwise empty sheet, hosted in its last cell.
fn run_command(expr: &str, width: usize, height: usize) -> ExitCode {
    let compact: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
    let formula = if compact.starts_with('=') {
        compact
    } else {
        format!("={}", compact)
    };

    let (x, y) = (width - 1, height - 1);
    let mut grid = Grid::new(width, height);
    grid.set(x, y, &formula);
    println!("{}", grid.value(x, y));

    match grid.kind(x, y) {
        Some(kind) if kind.is_error() => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}
