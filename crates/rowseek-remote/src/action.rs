//! Wire types of the persistence protocol.
//!
//! `POST /api` carries an [`Action`]; `GET /api` returns a [`Snapshot`].
//!
//! ```text
//! {"Show":[0,2,5]}      keep exactly these row positions
//! {"All":null}          clear filtering
//! {"rows":[{"vals":[1.5,-2.0]}, ...]}
//! ```

use rowseek::{KeepSet, Table};
use serde::{Deserialize, Serialize, Serializer};

/// Visibility action posted to `POST /api`.
///
/// Serializes as `{"Show":[...]}` or `{"All":null}`. Decoding also accepts
/// the bare string `"All"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum Action {
    /// Show only the rows at these 0-based snapshot positions.
    Show(Vec<usize>),
    /// Show every row.
    All,
}

impl Action {
    /// Builds a `Show` action from a keep-set computed over a snapshot.
    pub fn show(keep: &KeepSet) -> Self {
        Action::Show(keep.indices())
    }

    /// Returns the positions to show, or `None` for `All`.
    pub fn positions(&self) -> Option<&[usize]> {
        match self {
            Action::Show(positions) => Some(positions),
            Action::All => None,
        }
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Action::Show(positions) => {
                serializer.serialize_newtype_variant("Action", 0, "Show", positions)
            }
            // Newtype over unit so the payload is `{"All":null}`, not `"All"`
            Action::All => serializer.serialize_newtype_variant("Action", 1, "All", &()),
        }
    }
}

/// One cell as it appears in a snapshot's `vals` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A JSON number.
    Number(f64),
    /// A JSON string.
    Text(String),
    /// `null`, which is how non-finite numbers are written.
    Null,
}

impl Cell {
    /// Converts the cell to the text the engine sees.
    pub fn into_text(self) -> String {
        match self {
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s,
            Cell::Null => "NaN".to_string(),
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        if n.is_finite() {
            Cell::Number(n)
        } else {
            Cell::Null
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// One row of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    /// Record id, used as the row label.
    #[serde(default)]
    pub id: String,
    /// Column values, first data column first.
    pub vals: Vec<Cell>,
    /// Visibility as persisted by the server.
    #[serde(default = "visible_by_default")]
    pub show: bool,
}

fn visible_by_default() -> bool {
    true
}

impl SnapshotRow {
    /// Creates a visible row.
    pub fn new(id: impl Into<String>, vals: Vec<Cell>) -> Self {
        SnapshotRow {
            id: id.into(),
            vals,
            show: true,
        }
    }
}

/// Body of `GET /api`: the authoritative rows.
///
/// Unknown fields are ignored so servers may send extra state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Rows in server order; positions are the indices used by `Show`.
    pub rows: Vec<SnapshotRow>,
    /// Data column names, if the server provides them.
    #[serde(default)]
    pub names: Vec<String>,
    /// Last persisted query, if the server provides it.
    #[serde(default)]
    pub query: String,
}

impl Snapshot {
    /// Converts the snapshot into a table whose row ids are snapshot positions.
    ///
    /// Persisted visibility is carried over.
    pub fn into_table(self) -> Table {
        let hidden: Vec<bool> = self.rows.iter().map(|row| !row.show).collect();
        let mut table = Table::from_records(self.rows.into_iter().map(|row| {
            let cells: Vec<String> = row.vals.into_iter().map(Cell::into_text).collect();
            (row.id, cells)
        }))
        .with_names(self.names);

        if hidden.contains(&true) {
            let keep = table
                .rows()
                .iter()
                .filter(|row| !hidden[row.id().index()])
                .map(|row| row.id())
                .collect();
            table.apply_keep_set(&keep);
        }
        table
    }
}
