use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::sanitize::sanitize_key;

/// Which of the two header lines carries the units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderLayout {
    /// Primary tables: line 1 = units, line 2 = keys.
    UnitsThenKeys,
    /// Follow-up tables: line 1 = keys, line 2 = units with a `/100 g`
    /// suffix that is stripped on load.
    KeysThenUnits,
}

/// A composition table CSV loaded whole: two parallel header rows plus the
/// data rows. Blank lines (empty or whitespace only) are skipped; a row of
/// delimiters with no content is still a row. Embedded-comma quoting is not
/// a thing in these files.
#[derive(Debug)]
pub struct FoodTable {
    pub keys: Vec<String>,
    pub units: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl FoodTable {
    pub fn load(path: &Path, layout: HeaderLayout) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_csv_str(&text, layout)
    }

    pub fn from_csv_str(text: &str, layout: HeaderLayout) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());
        let mut records = rdr.records();

        let first = records
            .next()
            .context("missing first header line")?
            .context("reading first header line")?;
        let second = records
            .next()
            .context("missing second header line")?
            .context("reading second header line")?;

        let (units_rec, keys_rec) = match layout {
            HeaderLayout::UnitsThenKeys => (first, second),
            HeaderLayout::KeysThenUnits => (second, first),
        };

        let keys: Vec<String> = keys_rec.iter().map(str::to_string).collect();
        let units: Vec<String> = units_rec
            .iter()
            .map(|u| match layout {
                HeaderLayout::UnitsThenKeys => u.to_string(),
                HeaderLayout::KeysThenUnits => u.replace("/100 g", "").trim().to_string(),
            })
            .collect();

        let mut rows = Vec::new();
        for rec in records {
            let rec = rec.context("reading data row")?;
            if rec.len() <= 1 && rec.get(0).map_or(true, |f| f.trim().is_empty()) {
                continue;
            }
            rows.push(rec.iter().map(str::to_string).collect());
        }

        Ok(Self { keys, units, rows })
    }

    /// Sanitised key -> unit, empty string when the units row is shorter
    /// than the keys row. When duplicate raw keys sanitise to the same
    /// string, the later column wins.
    pub fn key_unit_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        for (i, key) in self.keys.iter().enumerate() {
            let unit = self.units.get(i).cloned().unwrap_or_default();
            map.insert(sanitize_key(key), unit);
        }
        map
    }
}
