use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use entitygen::emit::{self, NumericLayout};
use entitygen::named::named_tables;
use entitygen::ranges::compress_ranges;
use entitygen::table::{code_points, load_table, table_stats};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input JSON table (array of entity records).
    #[arg(long, default_value = "table.json")]
    table: PathBuf,

    /// Which generated block to emit.
    #[arg(long, value_enum, default_value_t = Emit::Named)]
    emit: Emit,

    /// Output path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Log summary statistics about the loaded table.
    #[arg(long)]
    stats: bool,

    /// Values per row in numeric array literals.
    #[arg(long, default_value_t = 10)]
    per_row: usize,

    /// Column width in numeric array literals.
    #[arg(long, default_value_t = 8)]
    column_width: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Emit {
    /// The plain code-point list.
    Codes,
    /// The code-point list collapsed into contiguous ranges.
    Ranges,
    /// The sorted (name, char) lookup tables.
    Named,
    /// All three blocks.
    All,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let records = load_table(&args.table)
        .with_context(|| format!("failed to load {}", args.table.display()))?;
    log::info!("loaded {} entity records", records.len());

    if args.stats {
        let stats = table_stats(&records);
        log::info!(
            "{} records, {} names (max {} per record; {} with one, {} with two, {} with more)",
            stats.records,
            stats.names,
            stats.max_names_per_record,
            stats.with_one_name,
            stats.with_two_names,
            stats.with_more_names,
        );
    }

    let layout = NumericLayout {
        per_row: args.per_row,
        width: args.column_width,
    };
    let codes = code_points(&records);

    // Build the whole block in memory first so a failure cannot leave a
    // partially written table behind.
    let mut output = String::new();
    if matches!(args.emit, Emit::Codes | Emit::All) {
        output.push_str(&emit::emit_code_points(&codes, layout));
    }
    if matches!(args.emit, Emit::Ranges | Emit::All) {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&emit::emit_code_ranges(&compress_ranges(&codes)));
    }
    if matches!(args.emit, Emit::Named | Emit::All) {
        if !output.is_empty() {
            output.push('\n');
        }
        let tables = named_tables(&records)?;
        log::info!(
            "{} named entries ({} minimal), longest name {} chars",
            tables.entries.len(),
            tables.minimal.len(),
            tables.max_name_length,
        );
        output.push_str(&emit::emit_named_tables(&tables)?);
    }

    match &args.out {
        Some(path) => fs::write(path, output.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout()
            .write_all(output.as_bytes())
            .context("failed to write to stdout")?,
    }

    Ok(())
}
