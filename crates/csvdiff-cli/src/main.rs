//! csvdiff CLI
//!
//! Interactive walkthrough: compares two CSV files cell by cell and asks
//! the operator to accept or reject each difference, then writes the
//! merged result to `merged_result.csv` in the current directory.

use clap::Parser;
use csvdiff_core::{
    apply_decisions, diff_tables, parse_csv, reconcile_schemas, write_csv_file, Decision,
    DiffMode, Difference, Table,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

const OUTPUT_PATH: &str = "merged_result.csv";

#[derive(Parser)]
#[command(name = "csvdiff")]
#[command(about = "Interactive cell-level CSV diff and merge", long_about = None)]
#[command(version)]
struct Cli {
    /// First (base) CSV file
    file1: PathBuf,

    /// Second CSV file to compare against
    file2: PathBuf,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> csvdiff_core::Result<()> {
    let cli = Cli::parse();

    println!(
        "Comparing {} with {}",
        cli.file1.display(),
        cli.file2.display()
    );

    let left = parse_csv(&cli.file1)?;
    let right = parse_csv(&cli.file2)?;

    let (left, right) = reconcile_schemas(&left, &right);
    let differences = diff_tables(&left, &right, DiffMode::NullAware);

    if differences.is_empty() {
        println!("No differences found between the files.");
        return Ok(());
    }

    println!("\nFound {} differences.", differences.len());

    let mut editor = DefaultEditor::new()
        .map_err(|e| std::io::Error::other(format!("failed to initialize prompt: {e}")))?;

    let mut decisions: Vec<(Difference, Decision)> = Vec::new();
    let mut aborted = false;

    for (i, diff) in differences.iter().enumerate() {
        println!("\nDifference {} of {}", i + 1, differences.len());
        display_difference(diff, &left, &right);

        let decision = prompt_decision(&mut editor)?;
        decisions.push((diff.clone(), decision));

        if decision == Decision::Abort {
            println!("Exiting...");
            aborted = true;
            break;
        }
    }

    let result = apply_decisions(&left, &decisions);
    write_csv_file(&result, OUTPUT_PATH)?;

    if aborted {
        println!("\nSaved partial merge to {}", OUTPUT_PATH);
    } else {
        println!("\nSaved merged result to {}", OUTPUT_PATH);
    }

    Ok(())
}

/// Show one difference with its full row context
fn display_difference(diff: &Difference, left: &Table, right: &Table) {
    println!("Row {}, Column: {}", diff.row + 1, diff.column);
    println!("Old value: {}{}{}", RED, fmt_cell(&diff.old_value), RESET);
    println!("New value: {}{}{}", GREEN, fmt_cell(&diff.new_value), RESET);

    println!("\nRow context:");
    println!("Column\tOld Value\tNew Value");
    println!("{}", "-".repeat(36));

    for col in &left.columns {
        let old = left.cell(diff.row, col.index).map(str::to_string);
        let new = right.cell(diff.row, col.index).map(str::to_string);

        if col.name == diff.column {
            println!(
                "{}\t{}{}{}\t{}{}{}",
                col.name,
                RED,
                fmt_cell(&old),
                RESET,
                GREEN,
                fmt_cell(&new),
                RESET
            );
        } else {
            println!("{}\t{}\t{}", col.name, fmt_cell(&old), fmt_cell(&new));
        }
    }
}

/// Prompt until the operator gives a valid answer; EOF and Ctrl-C abort
fn prompt_decision(editor: &mut DefaultEditor) -> csvdiff_core::Result<Decision> {
    loop {
        match editor.readline("\nAccept this change? (y/n/q to quit): ") {
            Ok(line) => match parse_decision(&line) {
                Some(decision) => return Ok(decision),
                None => {
                    println!(
                        "Invalid input. Please enter 'y' for yes, 'n' for no, or 'q' to quit."
                    );
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                return Ok(Decision::Abort);
            }
            Err(e) => {
                return Err(csvdiff_core::Error::Io(std::io::Error::other(format!(
                    "failed to read input: {e}"
                ))));
            }
        }
    }
}

fn parse_decision(input: &str) -> Option<Decision> {
    match input.trim().to_lowercase().as_str() {
        "y" => Some(Decision::Accept),
        "n" => Some(Decision::Reject),
        "q" => Some(Decision::Abort),
        _ => None,
    }
}

fn fmt_cell(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("(null)")
}
