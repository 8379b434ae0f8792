//! Loading `id,value` CSV files and merging them into one table.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{debug, warn};
use rowseek::Table;

/// One `id,value` line of an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub value: String,
}

impl Record {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Record {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// The records of one file, named after the file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    pub name: String,
    pub records: Vec<Record>,
}

/// Reads an `id,value` CSV file. The first line is a header and is skipped.
///
/// Values are kept as text; cells that are not numbers simply fail numeric
/// comparisons later.
pub fn load_records(path: impl AsRef<Path>) -> Result<RecordSet> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.with_context(|| format!("cannot read {}", path.display()))?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        match (row.get(0), row.get(1)) {
            (Some(id), Some(value)) if !id.is_empty() => records.push(Record::new(id, value)),
            _ => bail!("{}:{}: expected `id,value`", path.display(), line),
        }
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    debug!("loaded {} records from {}", records.len(), path.display());
    Ok(RecordSet { name, records })
}

/// Merges record sets by id into a table with one column per set.
///
/// Ids missing from any set are left out with a warning. Rows come out
/// sorted by id. When an id repeats within one set, the last value wins.
pub fn build_rows(sets: &[RecordSet]) -> Table {
    let width = sets.len();
    let mut merged: BTreeMap<&str, Vec<Option<&str>>> = BTreeMap::new();

    for (column, set) in sets.iter().enumerate() {
        for record in &set.records {
            let slots = merged
                .entry(record.id.as_str())
                .or_insert_with(|| vec![None; width]);
            if slots[column].replace(record.value.as_str()).is_some() {
                warn!("duplicate record {} in {}; keeping the last value", record.id, set.name);
            }
        }
    }

    let mut rows = Vec::with_capacity(merged.len());
    for (id, slots) in merged {
        let present = slots.iter().filter(|slot| slot.is_some()).count();
        if present == width {
            let cells: Vec<&str> = slots.into_iter().flatten().collect();
            rows.push((id, cells));
        } else {
            warn!("omitting record {} for {}/{} fields", id, present, width);
        }
    }

    Table::from_records(rows).with_names(sets.iter().map(|set| set.name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(name: &str, records: &[(&str, &str)]) -> RecordSet {
        RecordSet {
            name: name.to_string(),
            records: records.iter().map(|(id, v)| Record::new(*id, *v)).collect(),
        }
    }

    #[test]
    fn merges_by_id_in_id_order() {
        let table = build_rows(&[
            set("dde", &[("b", "2.0"), ("a", "1.0")]),
            set("rmsd", &[("a", "0.1"), ("b", "0.2")]),
        ]);
        assert_eq!(table.names(), ["dde", "rmsd"]);
        assert_eq!(table.rows()[0].label(), "a");
        assert_eq!(table.rows()[0].cells(), ["1.0", "0.1"]);
        assert_eq!(table.rows()[1].cells(), ["2.0", "0.2"]);
    }

    #[test]
    fn omits_partial_records() {
        let table = build_rows(&[
            set("dde", &[("a", "1"), ("b", "2")]),
            set("rmsd", &[("b", "3")]),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].label(), "b");
    }

    #[test]
    fn duplicate_ids_keep_last_value() {
        let table = build_rows(&[set("dde", &[("a", "1"), ("a", "5")])]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].cells(), ["5"]);
    }

    #[test]
    fn no_sets_gives_empty_table() {
        assert!(build_rows(&[]).is_empty());
    }
}
