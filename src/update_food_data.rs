/*
cargo run --bin update_food_data -- \
    --input-csv csv/20230428-mxt_kagsei-mext_00001_044.csv \
    --input-json food_data.json \
    --out-json food_data_new.json
*/

use std::fs::{create_dir_all, File};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use log::info;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

use hyakumi_foodgen::merge::merge_table;
use hyakumi_foodgen::record::FoodDataset;
use hyakumi_foodgen::table::{FoodTable, HeaderLayout};

// CLI parameters
#[derive(Parser, Debug)]
#[command(version, about = "Merge a follow-up composition table into the generated JSON dataset")]
struct Cli {
    /// Follow-up table CSV: line 1 = keys, line 2 = units, ID in column 1
    #[arg(long, default_value = "csv/20230428-mxt_kagsei-mext_00001_044.csv")]
    input_csv: PathBuf,
    /// Dataset produced by generate_food_data
    #[arg(long, default_value = "food_data.json")]
    input_json: PathBuf,
    /// Merged dataset, written next to the input rather than over it
    #[arg(long, default_value = "food_data_new.json")]
    out_json: PathBuf,
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // logging setup
    create_dir_all(&cli.log_dir)?;
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let log_path = cli.log_dir.join(format!("update_food_data_{ts}.log"));
    WriteLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        File::create(&log_path)?,
    )?;

    let mut dataset = FoodDataset::load(&cli.input_json)?;
    info!(
        "Loaded {} records from {}",
        dataset.len(),
        cli.input_json.display()
    );

    let table = FoodTable::load(&cli.input_csv, HeaderLayout::KeysThenUnits)?;
    info!(
        "Loaded {} follow-up rows across {} columns from {}",
        table.rows.len(),
        table.keys.len(),
        cli.input_csv.display()
    );

    let stats = merge_table(&mut dataset, &table);
    info!(
        "Merge done: {} rows matched, {} rows dropped (unknown ID), {} fields backfilled",
        stats.updated, stats.dropped, stats.backfilled
    );

    dataset.save(&cli.out_json)?;
    println!(
        "Merged {} into {} -> {} ({} matched, {} dropped, {} backfilled)",
        cli.input_csv.display(),
        cli.input_json.display(),
        cli.out_json.display(),
        stats.updated,
        stats.dropped,
        stats.backfilled
    );
    Ok(())
}
