//! Tally Sheets CLI - workbook inspection and splitting tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tally_sheets::prelude::*;

#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version, about = "Report workbook inspection and splitting tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all sheets in a workbook
    Sheets {
        /// Input workbook file
        input: PathBuf,
    },

    /// Show information about a workbook
    Info {
        /// Input workbook file
        input: PathBuf,
    },

    /// Convert a sheet to CSV and output to stdout or file
    #[command(alias = "csv")]
    ToCsv {
        /// Input workbook file
        input: PathBuf,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sheet index to convert (0-based, default: 0)
        #[arg(short, long, default_value = "0")]
        sheet: usize,
    },

    /// Split a sheet into files of at most N data rows each
    Split {
        /// Input workbook file
        input: PathBuf,

        /// Sheet index to split (0-based, default: 0)
        #[arg(short, long, default_value = "0")]
        sheet: usize,

        /// Maximum data rows per output file
        #[arg(short, long, default_value = "100")]
        max_rows: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sheets { input } => list_sheets(&input),
        Commands::Info { input } => show_info(&input),
        Commands::ToCsv {
            input,
            output,
            sheet,
        } => to_csv(&input, output.as_deref(), sheet),
        Commands::Split {
            input,
            sheet,
            max_rows,
        } => split(&input, sheet, max_rows),
    }
}

fn list_sheets(input: &PathBuf) -> Result<()> {
    let names = sheet_names(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    for (i, name) in names.iter().enumerate() {
        println!("{}: {}", i, name);
    }
    Ok(())
}

fn show_info(input: &PathBuf) -> Result<()> {
    let names = sheet_names(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    println!("File: {}", input.display());
    println!("Sheets: {}", names.len());
    for (i, name) in names.iter().enumerate() {
        let lines = num_lines_in_sheet(input, i)?;
        println!("  {}: {} ({} lines)", i, name, lines);
    }
    Ok(())
}

fn to_csv(input: &PathBuf, output: Option<&std::path::Path>, sheet: usize) -> Result<()> {
    let grid = sheet_to_array(input, SheetSelector::Index(sheet))
        .with_context(|| format!("Failed to read sheet {} of '{}'", sheet, input.display()))?;

    let mut writer: csv::Writer<Box<dyn io::Write>> = match output {
        Some(path) => csv::Writer::from_writer(Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?,
        )),
        None => csv::Writer::from_writer(Box::new(io::stdout())),
    };

    for row in grid {
        writer.write_record(row.iter().map(ToString::to_string))?;
    }
    writer.flush()?;
    Ok(())
}

fn split(input: &PathBuf, sheet: usize, max_rows: usize) -> Result<()> {
    let outputs = split_sheet(input, sheet, max_rows)
        .with_context(|| format!("Failed to split '{}'", input.display()))?;

    eprintln!("Wrote {} file(s)", outputs.len());
    for path in outputs {
        println!("{}", path.display());
    }
    Ok(())
}
