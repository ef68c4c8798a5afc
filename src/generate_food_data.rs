/*
cargo run --bin generate_food_data -- \
    --input-csv csv/20230428-mxt_kagsei-mext_00001_012.csv \
    --out-ts food_data.ts \
    --out-json food_data.json
*/

use std::fs::{self, create_dir_all, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::info;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

use hyakumi_foodgen::record::{records_from_table, FoodDataset};
use hyakumi_foodgen::table::{FoodTable, HeaderLayout};
use hyakumi_foodgen::ts_emit::render_ts;

// CLI parameters
#[derive(Parser, Debug)]
#[command(version, about = "Convert the primary composition table CSV into TypeScript and JSON")]
struct Cli {
    /// Primary table CSV: line 1 = units, line 2 = keys, data rows after
    #[arg(long, default_value = "csv/20230428-mxt_kagsei-mext_00001_012.csv")]
    input_csv: PathBuf,
    #[arg(long, default_value = "food_data.ts")]
    out_ts: PathBuf,
    #[arg(long, default_value = "food_data.json")]
    out_json: PathBuf,
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // logging setup
    create_dir_all(&cli.log_dir)?;
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let log_path = cli.log_dir.join(format!("generate_food_data_{ts}.log"));
    WriteLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        File::create(&log_path)?,
    )?;
    info!("Reading {}", cli.input_csv.display());

    let table = FoodTable::load(&cli.input_csv, HeaderLayout::UnitsThenKeys)?;
    info!(
        "Loaded {} data rows across {} columns",
        table.rows.len(),
        table.keys.len()
    );

    let records = records_from_table(&table)?;
    let ts_source = render_ts(&table, &records);
    fs::write(&cli.out_ts, ts_source)
        .with_context(|| format!("writing {}", cli.out_ts.display()))?;
    info!("Wrote {} item literals to {}", records.len(), cli.out_ts.display());

    let dataset = FoodDataset::from_table(&table)?;
    dataset.save(&cli.out_json)?;
    info!("Wrote {} records to {}", dataset.len(), cli.out_json.display());

    println!(
        "Generated {} and {} from {} ({} rows, {} with usable IDs)",
        cli.out_ts.display(),
        cli.out_json.display(),
        cli.input_csv.display(),
        records.len(),
        dataset.len()
    );
    Ok(())
}
