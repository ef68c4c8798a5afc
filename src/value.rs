// The tables push three states through one string channel: not measured,
// trace amount, and a measured quantity. Normalise all of them into a single
// display convention.

/// Field was not measured or is not applicable.
pub const MISSING: &str = "-";

/// Nutrient present but below the quantification threshold.
pub const TRACE: &str = "Tr";

/// Format one measured cell for display. Parentheses mark estimated values in
/// the source and are dropped; a missing unit is tolerated.
pub fn process_value(raw: &str, unit: &str) -> String {
    let clean: String = raw.chars().filter(|c| !matches!(c, '(' | ')')).collect();
    if clean == MISSING || clean.is_empty() {
        return MISSING.to_string();
    }
    if clean == TRACE {
        return TRACE.to_string();
    }
    format!("{clean} {unit}").trim_end().to_string()
}
