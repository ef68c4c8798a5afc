//! Converts the MEXT food composition tables (CSV) into TypeScript and JSON
//! artifacts, and merges follow-up tables into an existing JSON dataset.

pub mod merge;
pub mod record;
pub mod sanitize;
pub mod table;
pub mod ts_emit;
pub mod value;
