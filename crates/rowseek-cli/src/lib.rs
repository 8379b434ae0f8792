//! Building blocks of the `rowseek` command: CSV loading and rendering.

pub mod records;
pub mod render;

pub use records::{build_rows, load_records, Record, RecordSet};
pub use render::{format_cell, render_json, render_text, PAGE_LIMIT};
