use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize_key;
use crate::table::FoodTable;
use crate::value::process_value;

/// The leading identity columns of every table: category, id, index, name.
pub const FIXED_FIELDS: usize = 4;

/// Sanitised keys that would collide with the fixed fields; the flattened
/// serialization would emit duplicate JSON keys if these ever reached the
/// measured map.
pub const RESERVED_KEYS: [&str; FIXED_FIELDS] = ["category", "id", "index", "name"];

/// One food item: the four identity columns as fixed fields, every other
/// column as a measured nutrient keyed by its sanitised header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub category: String,
    pub id: String,
    pub index: String,
    pub name: String,
    #[serde(flatten)]
    pub measured: BTreeMap<String, String>,
}

impl FoodRecord {
    /// Map one data row against the sanitised keys and their units. The
    /// identity columns are taken verbatim, never unit-suffixed.
    pub fn from_row(
        keys: &[String],
        key_unit_map: &HashMap<String, String>,
        values: &[String],
    ) -> Result<Self> {
        ensure!(
            values.len() >= FIXED_FIELDS,
            "row has {} columns, need at least {FIXED_FIELDS}",
            values.len()
        );

        let mut measured = BTreeMap::new();
        for (i, value) in values.iter().enumerate().skip(FIXED_FIELDS) {
            let key = match keys.get(i) {
                Some(k) => sanitize_key(k),
                None => format!("column{i}"),
            };
            if RESERVED_KEYS.contains(&key.as_str()) {
                warn!("column {i} sanitises to reserved key {key}, skipped");
                continue;
            }
            let unit = key_unit_map.get(&key).map(String::as_str).unwrap_or("");
            measured.insert(key, process_value(value, unit));
        }

        Ok(Self {
            category: values[0].clone(),
            id: values[1].clone(),
            index: values[2].clone(),
            name: values[3].clone(),
            measured,
        })
    }
}

/// Build one record per data row, in row order.
pub fn records_from_table(table: &FoodTable) -> Result<Vec<FoodRecord>> {
    let unit_map = table.key_unit_map();
    table
        .rows
        .iter()
        .map(|row| FoodRecord::from_row(&table.keys, &unit_map, row))
        .collect()
}

/// Record ID -> record, in stable ID order. Loaded, merged into and
/// re-serialised by the updater; the JSON form round-trips byte-identically.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodDataset(pub BTreeMap<String, FoodRecord>);

impl FoodDataset {
    /// Records with an empty ID are excluded.
    pub fn from_table(table: &FoodTable) -> Result<Self> {
        let mut records = BTreeMap::new();
        for record in records_from_table(table)? {
            if record.id.is_empty() {
                warn!("row for {:?} has an empty id, excluded", record.name);
                continue;
            }
            records.insert(record.id.clone(), record);
        }
        Ok(Self(records))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    /// Pretty-printed with 2-space indentation, non-ASCII left unescaped.
    pub fn save(&self, path: &Path) -> Result<()> {
        let pretty = serde_json::to_string_pretty(self)?;
        fs::write(path, pretty).with_context(|| format!("writing {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
