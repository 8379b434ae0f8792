//! The persistence seam and an in-memory implementation.

use log::trace;
use rowseek::Table;

use crate::action::{Action, Cell, Snapshot, SnapshotRow};
use crate::error::Result;

/// Backend that persists queries and visibility for a shared table.
///
/// Each method is one request of the protocol. Implementations report
/// failures as [`RemoteError`](crate::RemoteError) values tagged with the
/// step that failed.
pub trait RemoteStore {
    /// Persists the raw query text (`POST /set-query`).
    fn set_query(&mut self, query: &str) -> Result<()>;

    /// Fetches the authoritative rows (`GET /api`).
    fn fetch_rows(&mut self) -> Result<Snapshot>;

    /// Posts a visibility action (`POST /api`).
    fn post_action(&mut self, action: &Action) -> Result<()>;
}

impl<S: RemoteStore + ?Sized> RemoteStore for &mut S {
    fn set_query(&mut self, query: &str) -> Result<()> {
        (**self).set_query(query)
    }

    fn fetch_rows(&mut self) -> Result<Snapshot> {
        (**self).fetch_rows()
    }

    fn post_action(&mut self, action: &Action) -> Result<()> {
        (**self).post_action(action)
    }
}

/// A request received by a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    SetQuery(String),
    FetchRows,
    PostAction(Action),
}

/// Store that keeps server state in memory and records every request.
///
/// `Show` replaces visibility: listed positions become visible and every
/// other row is hidden. `All` makes every row visible. Positions past the
/// end are ignored.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Snapshot,
    journal: Vec<Request>,
}

impl MemoryStore {
    /// Creates a store holding the given rows.
    pub fn new(rows: Vec<SnapshotRow>) -> Self {
        MemoryStore {
            snapshot: Snapshot {
                rows,
                ..Snapshot::default()
            },
            journal: Vec::new(),
        }
    }

    /// Creates a store from a table, keeping its visibility and names.
    pub fn from_table(table: &Table) -> Self {
        let rows = table
            .rows()
            .iter()
            .map(|row| SnapshotRow {
                id: row.label().to_string(),
                vals: row
                    .cells()
                    .iter()
                    .map(|cell| Cell::Text(cell.clone()))
                    .collect(),
                show: row.is_visible(),
            })
            .collect();
        let mut store = MemoryStore::new(rows);
        store.snapshot.names = table.names().to_vec();
        store
    }

    /// Current server state.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Last persisted query text.
    pub fn query(&self) -> &str {
        &self.snapshot.query
    }

    /// Positions of rows currently marked visible.
    pub fn visible_positions(&self) -> Vec<usize> {
        self.snapshot
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.show)
            .map(|(i, _)| i)
            .collect()
    }

    /// Requests received so far, oldest first.
    pub fn journal(&self) -> &[Request] {
        &self.journal
    }

    /// Returns and clears the request journal.
    pub fn take_journal(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.journal)
    }
}

impl RemoteStore for MemoryStore {
    fn set_query(&mut self, query: &str) -> Result<()> {
        trace!("memory store: set query {:?}", query);
        self.journal.push(Request::SetQuery(query.to_string()));
        self.snapshot.query = query.to_string();
        Ok(())
    }

    fn fetch_rows(&mut self) -> Result<Snapshot> {
        trace!("memory store: fetch {} rows", self.snapshot.rows.len());
        self.journal.push(Request::FetchRows);
        Ok(self.snapshot.clone())
    }

    fn post_action(&mut self, action: &Action) -> Result<()> {
        trace!("memory store: post {:?}", action);
        self.journal.push(Request::PostAction(action.clone()));
        match action {
            Action::Show(positions) => {
                for row in &mut self.snapshot.rows {
                    row.show = false;
                }
                for &position in positions {
                    if let Some(row) = self.snapshot.rows.get_mut(position) {
                        row.show = true;
                    }
                }
            }
            Action::All => {
                for row in &mut self.snapshot.rows {
                    row.show = true;
                }
            }
        }
        Ok(())
    }
}
