//! HPLC Standard Matcher CLI
//!
//! Command-line tool for matching HPLC peak tables against a standards
//! dictionary and exporting the consolidated stddf table.

use clap::{Parser, Subcommand};
use hplc_core::{
    compute_result, detect_numeric_columns, discover_tables, read_table, summarize_column,
    to_delimited, Standards, Table,
};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hplc-cli")]
#[command(about = "HPLC Standard Matcher", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match peak tables against standards and build the stddf table
    Match {
        /// Peak-table files (TSV/CSV, auto-detected delimiter)
        #[arg(short, long)]
        file: Vec<PathBuf>,

        /// Directories to scan for peak-table files
        #[arg(short, long)]
        dir: Vec<PathBuf>,

        /// Standards JSON file (name -> retention time)
        #[arg(short, long)]
        standards: PathBuf,

        /// Retention-time tolerance (positive)
        #[arg(short = 't', long)]
        rt_thr: f64,

        /// Directory to write stddf.csv and stddf.tsv into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write stddf.json next to the delimited exports
        #[arg(long)]
        json: bool,

        /// Maximum number of rows to display
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Parse and display a single peak-table file
    Parse {
        /// Path to the peak-table file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print mean +/- SD per (standard, sample) for one result column
    Summary {
        /// Peak-table files (TSV/CSV)
        #[arg(short, long)]
        file: Vec<PathBuf>,

        /// Directories to scan for peak-table files
        #[arg(short, long)]
        dir: Vec<PathBuf>,

        /// Standards JSON file (name -> retention time)
        #[arg(short, long)]
        standards: PathBuf,

        /// Retention-time tolerance (positive)
        #[arg(short = 't', long)]
        rt_thr: f64,

        /// Column to summarize (defaults to the last numeric column)
        #[arg(short, long)]
        column: Option<String>,
    },
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> hplc_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            file,
            dir,
            standards,
            rt_thr,
            output,
            json,
            limit,
        } => cmd_match(&file, &dir, &standards, rt_thr, output.as_deref(), json, limit),
        Commands::Parse { file } => cmd_parse(&file),
        Commands::Summary {
            file,
            dir,
            standards,
            rt_thr,
            column,
        } => cmd_summary(&file, &dir, &standards, rt_thr, column.as_deref()),
    }
}

/// Gather explicit files plus directory discoveries and parse them all
fn load_tables(files: &[PathBuf], dirs: &[PathBuf]) -> hplc_core::Result<Vec<Table>> {
    let mut paths: Vec<PathBuf> = files.to_vec();
    if !dirs.is_empty() {
        paths.extend(discover_tables(dirs)?);
    }
    if paths.is_empty() {
        return Err(hplc_core::Error::EmptyInput);
    }

    let mut tables = Vec::with_capacity(paths.len());
    for path in &paths {
        tables.push(read_table(path)?);
    }
    Ok(tables)
}

fn cmd_match(
    files: &[PathBuf],
    dirs: &[PathBuf],
    standards_path: &std::path::Path,
    rt_thr: f64,
    output: Option<&std::path::Path>,
    json: bool,
    limit: Option<usize>,
) -> hplc_core::Result<()> {
    let tables = load_tables(files, dirs)?;
    let standards = Standards::load(standards_path)?;

    let stddf = compute_result(&tables, &standards, rt_thr)?;

    println!("Files: {}", tables.len());
    println!("Standards: {}", standards.len());
    println!("Result rows: {}", stddf.row_count());
    println!("Result columns: {}", stddf.column_count());
    println!();

    print_table(&stddf, limit.unwrap_or(10));

    if let Some(output_dir) = output {
        fs::create_dir_all(output_dir)?;

        let csv_path = output_dir.join("stddf.csv");
        fs::write(&csv_path, to_delimited(&stddf, ','))?;
        println!("Wrote {}", csv_path.display());

        let tsv_path = output_dir.join("stddf.tsv");
        fs::write(&tsv_path, to_delimited(&stddf, '\t'))?;
        println!("Wrote {}", tsv_path.display());

        if json {
            let json_path = output_dir.join("stddf.json");
            fs::write(&json_path, serde_json::to_string_pretty(&stddf)?)?;
            println!("Wrote {}", json_path.display());
        }
    }

    Ok(())
}

fn cmd_parse(file: &PathBuf) -> hplc_core::Result<()> {
    let table = read_table(file)?;

    println!("File: {}", file.display());
    println!("Columns: {}", table.column_count());
    println!("Rows: {}", table.row_count());
    println!();

    print_table(&table, 10);

    Ok(())
}

fn cmd_summary(
    files: &[PathBuf],
    dirs: &[PathBuf],
    standards_path: &std::path::Path,
    rt_thr: f64,
    column: Option<&str>,
) -> hplc_core::Result<()> {
    let tables = load_tables(files, dirs)?;
    let standards = Standards::load(standards_path)?;
    let stddf = compute_result(&tables, &standards, rt_thr)?;

    let numeric = detect_numeric_columns(&stddf);
    let column = match column {
        Some(c) => c.to_string(),
        None => match numeric.last() {
            Some(c) => c.clone(),
            None => {
                println!("No numeric columns to summarize.");
                return Ok(());
            }
        },
    };

    println!("{} by (Standard, Sample):", column);
    println!();
    for group in summarize_column(&stddf, &column) {
        match group.summary.mean {
            Some(mean) => println!(
                "  {} / {}: {:.2} +/- {:.2} (n={})",
                group.standard, group.sample, mean, group.summary.std, group.summary.n
            ),
            None => println!("  {} / {}: no values", group.standard, group.sample),
        }
    }

    Ok(())
}

/// Print a tab-joined preview of a table
fn print_table(table: &Table, row_limit: usize) {
    println!("{}", table.columns.join("\t"));
    println!("{}", "-".repeat(table.column_count() * 12));

    for row in table.rows.iter().take(row_limit) {
        let values: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        println!("{}", values.join("\t"));
    }

    if table.row_count() > row_limit {
        println!("... ({} more rows)", table.row_count() - row_limit);
    }
}
