//! gridcalc - formula grid from the command line

mod config;
mod render;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use gridcalc_core::{CellRef, DEFAULT_COLUMNS, DEFAULT_PRECISION, DEFAULT_ROWS, Sheet};
use gridcalc_engine::engine::format_value;
use tracing_subscriber::EnvFilter;

use render::View;

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(about = "Grid of infix formulas, recalculated in dependency order")]
#[command(version)]
#[command(after_help = "\
Examples:
  gridcalc -s A0=5 -s B0=A0*2 -s C0=(A0+B0)^2
  gridcalc budget.grid -s C3=C1+C2 -w
  gridcalc budget.grid -e 'A0/B0' -p 3")]
struct Cli {
    /// Sheet file to open; created on --write if it does not exist
    file: Option<PathBuf>,

    /// Rows in a new sheet
    #[arg(long, short = 'r')]
    rows: Option<usize>,

    /// Columns in a new sheet
    #[arg(long, short = 'c')]
    columns: Option<usize>,

    /// Decimal places shown for values (0-8)
    #[arg(long, short = 'p')]
    precision: Option<usize>,

    /// Assign a formula to a cell, e.g. B2=A0*3 (an empty formula clears)
    #[arg(long = "set", short = 's', value_name = "ADDR=FORMULA", value_parser = parse_assignment)]
    sets: Vec<(CellRef, String)>,

    /// Clear a cell
    #[arg(long = "clear", value_name = "ADDR", value_parser = parse_address)]
    clears: Vec<CellRef>,

    /// Clear every cell before other edits
    #[arg(long)]
    clear_all: bool,

    /// Evaluate a formula against the sheet and print the result
    #[arg(long = "eval", short = 'e', value_name = "FORMULA")]
    evals: Vec<String>,

    /// Show formulas instead of values
    #[arg(long)]
    formulas: bool,

    /// Save the sheet to this file
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Save the sheet back to FILE
    #[arg(long, short = 'w')]
    write: bool,

    /// Read settings from this TOML file instead of the user config
    #[arg(long, conflicts_with = "no_config")]
    config: Option<PathBuf>,

    /// Ignore any config file
    #[arg(long)]
    no_config: bool,

    /// Debug logging on stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn parse_address(s: &str) -> Result<CellRef, String> {
    s.trim().parse::<CellRef>().map_err(|e| e.to_string())
}

fn parse_assignment(s: &str) -> Result<(CellRef, String), String> {
    let (address, formula) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ADDR=FORMULA, got '{}'", s))?;
    Ok((parse_address(address)?, formula.to_string()))
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("GRIDCALC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Apply one edit, restoring the previous formula if it is rejected.
fn apply_edit(sheet: &mut Sheet, cell: &CellRef, formula: &str) -> gridcalc_engine::Result<()> {
    let previous = sheet.get_formula(cell)?.to_string();
    if let Err(err) = sheet.set_formula_and_recalculate(cell, formula) {
        sheet.set_formula(cell, &previous)?;
        sheet.evaluate_sheet()?;
        return Err(err);
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let (config, warnings) = if cli.no_config {
        (config::Config::default(), Vec::new())
    } else {
        config::load_config(cli.config.as_deref())
    };
    for warning in warnings {
        tracing::warn!("{}", warning);
    }

    let rows = cli.rows.or(config.rows).unwrap_or(DEFAULT_ROWS);
    let columns = cli.columns.or(config.columns).unwrap_or(DEFAULT_COLUMNS);
    let mut sheet = Sheet::with_file(cli.file.clone(), rows, columns).with_context(|| {
        match &cli.file {
            Some(path) => format!("cannot open {}", path.display()),
            None => "cannot create sheet".to_string(),
        }
    })?;

    let precision = cli.precision.or(config.precision).unwrap_or(DEFAULT_PRECISION);
    sheet.set_precision(precision)?;

    let mut failed = 0usize;
    if cli.clear_all {
        sheet.clear_all();
    }
    let edits = cli
        .clears
        .iter()
        .map(|cell| (*cell, ""))
        .chain(cli.sets.iter().map(|(cell, formula)| (*cell, formula.as_str())));
    for (cell, formula) in edits {
        if let Err(err) = apply_edit(&mut sheet, &cell, formula) {
            eprintln!("Error: {}: {}", cell, err);
            failed += 1;
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.evals.is_empty() {
        let view = if cli.formulas {
            View::Formulas
        } else {
            View::Values
        };
        render::write_grid(&mut out, &sheet, view)?;
    } else {
        for formula in &cli.evals {
            match sheet.evaluate_formula(formula) {
                Ok(value) => writeln!(out, "{}", format_value(value, sheet.precision()))?,
                Err(err) => {
                    eprintln!("Error: {}: {}", formula, err);
                    failed += 1;
                }
            }
        }
    }
    out.flush()?;

    if let Some(path) = &cli.output {
        let saved = sheet.save_as(path)?;
        eprintln!("Saved to {}", saved.display());
    } else if cli.write {
        anyhow::ensure!(
            sheet.file_path.is_some(),
            "--write needs a FILE argument (or use --output)"
        );
        let saved = sheet.save_file()?;
        eprintln!("Saved to {}", saved.display());
    }

    Ok(if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
