use std::collections::HashSet;

use log::warn;

use crate::record::{FoodDataset, RESERVED_KEYS};
use crate::sanitize::sanitize_key;
use crate::table::FoodTable;
use crate::value::{process_value, MISSING};

/// Columns 0..=4 of a follow-up table repeat identity/name data already
/// present from the initial generation pass.
pub const SKIP_THROUGH: usize = 4;

/// The follow-up tables carry the food ID in their second column.
pub const ID_COLUMN: usize = 1;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Rows whose ID matched an existing record.
    pub updated: usize,
    /// Rows whose ID was unknown; no new records are ever created.
    pub dropped: usize,
    /// Missing-marker fields written onto records absent from the CSV.
    pub backfilled: usize,
}

/// Fold a follow-up table into the dataset. New fields are added, existing
/// fields are never overwritten, and records the CSV does not mention are
/// backfilled with `-` for every incoming column so the field set stays
/// uniform across the dataset.
pub fn merge_table(dataset: &mut FoodDataset, table: &FoodTable) -> MergeStats {
    let unit_map = table.key_unit_map();
    let mut stats = MergeStats::default();
    let mut seen: HashSet<String> = HashSet::new();

    for row in &table.rows {
        let Some(id) = row.get(ID_COLUMN) else {
            continue;
        };
        let Some(record) = dataset.0.get_mut(id) else {
            warn!("no existing record for id {id}, row dropped");
            stats.dropped += 1;
            continue;
        };
        seen.insert(id.clone());
        stats.updated += 1;

        for (i, value) in row.iter().enumerate() {
            if i <= SKIP_THROUGH {
                continue;
            }
            let key = match table.keys.get(i) {
                Some(k) => sanitize_key(k),
                None => format!("column{i}"),
            };
            if RESERVED_KEYS.contains(&key.as_str()) {
                warn!("column {i} sanitises to reserved key {key}, skipped");
                continue;
            }
            if record.measured.contains_key(&key) {
                continue;
            }
            let unit = unit_map.get(&key).map(String::as_str).unwrap_or("");
            record.measured.insert(key, process_value(value, unit));
        }
    }

    let incoming_keys: Vec<String> = table
        .keys
        .iter()
        .enumerate()
        .filter(|(i, _)| *i > SKIP_THROUGH)
        .map(|(_, k)| sanitize_key(k))
        .filter(|k| !RESERVED_KEYS.contains(&k.as_str()))
        .collect();

    for (id, record) in dataset.0.iter_mut() {
        if seen.contains(id) {
            continue;
        }
        for key in &incoming_keys {
            if !record.measured.contains_key(key) {
                record.measured.insert(key.clone(), MISSING.to_string());
                stats.backfilled += 1;
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::HeaderLayout;

    const PRIMARY: &str = "\
,,,,kcal
category,id,index,name,energy
01,01001,1,first,343
01,01002,2,second,120
";

    const FOLLOW_UP: &str = "\
key0,id,a,b,name,fiber,energy
,,,,,g/100 g,kcal/100 g
x,01001,1,2,first,3.2,999
x,09999,9,9,stranger,1.0,1
";

    fn dataset() -> FoodDataset {
        let t = FoodTable::from_csv_str(PRIMARY, HeaderLayout::UnitsThenKeys).unwrap();
        FoodDataset::from_table(&t).unwrap()
    }

    fn follow_up() -> FoodTable {
        FoodTable::from_csv_str(FOLLOW_UP, HeaderLayout::KeysThenUnits).unwrap()
    }

    #[test]
    fn adds_new_fields_to_matching_records() {
        let mut ds = dataset();
        let stats = merge_table(&mut ds, &follow_up());
        assert_eq!(stats.updated, 1);
        assert_eq!(ds.0["01001"].measured["fiber"], "3.2 g");
    }

    #[test]
    fn never_overwrites_existing_fields() {
        let mut ds = dataset();
        merge_table(&mut ds, &follow_up());
        // energy came from the primary pass and must keep its value
        assert_eq!(ds.0["01001"].measured["energy"], "343 kcal");
    }

    #[test]
    fn unknown_ids_are_dropped_not_created() {
        let mut ds = dataset();
        let stats = merge_table(&mut ds, &follow_up());
        assert_eq!(stats.dropped, 1);
        assert!(!ds.0.contains_key("09999"));
    }

    #[test]
    fn absent_records_are_backfilled_with_missing_marker() {
        let mut ds = dataset();
        let stats = merge_table(&mut ds, &follow_up());
        // 01002 never appears in the follow-up CSV
        assert_eq!(ds.0["01002"].measured["fiber"], "-");
        assert_eq!(stats.backfilled, 1, "energy already present, only fiber backfilled");
    }

    #[test]
    fn reserved_keys_never_reach_the_measured_map() {
        let follow_up = "\
key0,id,a,b,name,name
,,,,,g/100 g
x,01001,1,2,first,7.7
";
        let t = FoodTable::from_csv_str(follow_up, HeaderLayout::KeysThenUnits).unwrap();
        let mut ds = dataset();
        merge_table(&mut ds, &t);

        // the fixed field keeps its value and the JSON object stays valid,
        // with exactly one "name" key per record
        assert_eq!(ds.0["01001"].name, "first");
        assert!(!ds.0["01001"].measured.contains_key("name"));
        assert!(!ds.0["01002"].measured.contains_key("name"));
        let pretty = serde_json::to_string_pretty(&ds.0["01001"]).unwrap();
        assert_eq!(pretty.matches("\"name\":").count(), 1);
    }

    #[test]
    fn field_set_is_uniform_after_merge() {
        let mut ds = dataset();
        merge_table(&mut ds, &follow_up());
        let keys_a: Vec<_> = ds.0["01001"].measured.keys().collect();
        let keys_b: Vec<_> = ds.0["01002"].measured.keys().collect();
        assert_eq!(keys_a, keys_b);
    }
}
