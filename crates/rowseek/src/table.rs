//! In-memory table model.
//!
//! A [`Table`] is an ordered list of [`Row`]s. The engine only ever changes
//! row order and row visibility; cell text is fixed at construction. Each row
//! carries a stable [`RowId`] so that visibility decisions ([`KeepSet`]) do
//! not depend on where the row currently sits.

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ordering::{sort_by_column, SortState};
use crate::query::{compute_keep_set, Query};
use crate::traits::Columns;

/// Stable identity of a row: its position in the source data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RowId(pub usize);

impl RowId {
    /// Returns the source position this id was assigned from.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One row of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    id: RowId,
    label: String,
    cells: Vec<String>,
    visible: bool,
}

impl Row {
    /// Creates a visible row.
    pub fn new(id: RowId, label: impl Into<String>, cells: Vec<String>) -> Self {
        Row {
            id,
            label: label.into(),
            cells,
            visible: true,
        }
    }

    /// Returns the row's stable identity.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Returns the label column (column 0).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the data columns (columns 1 and up).
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Returns `true` unless the last applied query hid this row.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Columns for Row {
    fn column_text(&self, column: usize) -> Option<&str> {
        match column {
            0 => Some(&self.label),
            n => self.cells.get(n - 1).map(String::as_str),
        }
    }

    fn width(&self) -> usize {
        self.cells.len()
    }
}

/// The set of rows that remain visible after a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeepSet(BTreeSet<RowId>);

impl KeepSet {
    /// Creates an empty keep-set (hides everything when applied).
    pub fn new() -> Self {
        KeepSet::default()
    }

    /// Adds a row id.
    pub fn insert(&mut self, id: RowId) -> bool {
        self.0.insert(id)
    }

    /// Returns `true` if the row is kept.
    pub fn contains(&self, id: RowId) -> bool {
        self.0.contains(&id)
    }

    /// Number of kept rows.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no row is kept.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates kept ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = RowId> + '_ {
        self.0.iter().copied()
    }

    /// Kept ids as plain source positions, ascending.
    pub fn indices(&self) -> Vec<usize> {
        self.iter().map(RowId::index).collect()
    }
}

impl FromIterator<RowId> for KeepSet {
    fn from_iter<I: IntoIterator<Item = RowId>>(iter: I) -> Self {
        KeepSet(iter.into_iter().collect())
    }
}

/// An ordered collection of rows with optional column names.
///
/// # Example
///
/// ```
/// use rowseek::{SortState, Table};
///
/// let mut table = Table::from_records(vec![
///     ("a", vec!["5"]),
///     ("b", vec!["2"]),
///     ("c", vec!["9"]),
/// ]);
///
/// let kept = table.apply_query("$1 > 3").unwrap();
/// assert_eq!(kept.len(), 2);
///
/// let mut state = SortState::new();
/// table.sort_by_column(1, &mut state);
/// let labels: Vec<&str> = table.rows().iter().map(|r| r.label()).collect();
/// assert_eq!(labels, ["b", "a", "c"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    names: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates a table from prepared rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Table {
            names: Vec::new(),
            rows,
        }
    }

    /// Creates a table from `(label, cells)` records, assigning ids by position.
    pub fn from_records<I, L, C>(records: I) -> Self
    where
        I: IntoIterator<Item = (L, Vec<C>)>,
        L: Into<String>,
        C: Into<String>,
    {
        let rows = records
            .into_iter()
            .enumerate()
            .map(|(i, (label, cells))| {
                Row::new(RowId(i), label, cells.into_iter().map(Into::into).collect())
            })
            .collect();
        Table::new(rows)
    }

    /// Sets the names of the data columns (used for headers).
    pub fn with_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the data column names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the rows in their current order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows, visible or not.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds a row by id.
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Iterates visible rows in their current order.
    pub fn visible(&self) -> impl Iterator<Item = &Row> + '_ {
        self.rows.iter().filter(|row| row.visible)
    }

    /// Every row id in the table.
    pub fn ids(&self) -> KeepSet {
        self.rows.iter().map(Row::id).collect()
    }

    /// Makes every row visible.
    pub fn show_all(&mut self) {
        for row in &mut self.rows {
            row.visible = true;
        }
    }

    /// Sets visibility from a keep-set, replacing any previous state.
    pub fn apply_keep_set(&mut self, keep: &KeepSet) {
        for row in &mut self.rows {
            row.visible = keep.contains(row.id);
        }
    }

    /// Compiles and applies a query, returning the resulting keep-set.
    ///
    /// An empty query shows every row. On error the table is left exactly
    /// as it was.
    pub fn apply_query(&mut self, text: &str) -> Result<KeepSet> {
        let query = Query::compile(text)?;
        self.filter(&query)
    }

    /// Applies an already compiled query.
    pub fn filter(&mut self, query: &Query) -> Result<KeepSet> {
        let keep = compute_keep_set(&self.rows, Some(query))?;
        self.apply_keep_set(&keep);
        debug!(
            "query `{}` keeps {} of {} rows",
            query.source(),
            keep.len(),
            self.rows.len()
        );
        Ok(keep)
    }

    /// Reorders rows in place by one column.
    ///
    /// Column 0 sorts by label. See [`sort_by_column`] for the algorithm.
    pub fn sort_by_column(&mut self, column: usize, state: &mut SortState) {
        sort_by_column(&mut self.rows, column, state);
    }
}
