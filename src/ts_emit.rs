use crate::record::{FoodRecord, FIXED_FIELDS};
use crate::sanitize::sanitize_key;
use crate::table::FoodTable;

/// Render the table as TypeScript source: an exported `FoodItem` interface
/// (measured fields annotated with their unit) and an exported literal array
/// of records in row order.
pub fn render_ts(table: &FoodTable, records: &[FoodRecord]) -> String {
    let column_keys: Vec<String> = table
        .keys
        .iter()
        .skip(FIXED_FIELDS)
        .map(|k| sanitize_key(k))
        .collect();

    let mut out = String::new();
    out.push_str("// 可食部100g当たり\n");
    out.push_str("// Food item interface\n");
    out.push_str("export interface FoodItem {\n");
    out.push_str("  category: string;\n");
    out.push_str("  id: string;\n");
    out.push_str("  index: string;\n");
    out.push_str("  name: string;\n");
    for (key, i) in column_keys.iter().zip(FIXED_FIELDS..) {
        let unit = table.units.get(i).map(String::as_str).unwrap_or("");
        out.push_str(&format!("  /** {unit} */\n"));
        out.push_str(&format!("  {key}: string;\n"));
    }
    out.push_str("}\n\n");

    out.push_str("export const foodItems: FoodItem[] = [\n");
    for rec in records {
        out.push_str("  {\n");
        push_field(&mut out, "category", &rec.category);
        push_field(&mut out, "id", &rec.id);
        push_field(&mut out, "index", &rec.index);
        push_field(&mut out, "name", &rec.name);
        for key in &column_keys {
            if let Some(v) = rec.measured.get(key) {
                push_field(&mut out, key, v);
            }
        }
        // rows longer than the header still carry their positional extras
        for (key, v) in &rec.measured {
            if !column_keys.contains(key) {
                push_field(&mut out, key, v);
            }
        }
        out.push_str("  },\n");
    }
    out.push_str("];\n");
    out
}

fn push_field(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("    {key}: \"{value}\",\n"));
}
