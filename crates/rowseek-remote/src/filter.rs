//! Applying a query against a remote table.
//!
//! A non-empty query runs as one round trip:
//!
//! 1. compile the query locally (nothing is sent if it is malformed)
//! 2. `POST /set-query` with the raw text
//! 3. `GET /api` for the authoritative rows
//! 4. evaluate the query against every fetched row
//! 5. `POST /api` with `{"Show":[...]}` listing the matching positions
//! 6. reload the view
//!
//! An empty query only posts `{"All":null}` and reloads; nothing is
//! persisted, fetched or evaluated. Any failure stops the
//! sequence where it happened and the view is not reloaded.

use log::{debug, info};
use rowseek::{compute_keep_set, Query};

use crate::action::Action;
use crate::error::Result;
use crate::store::RemoteStore;

/// Something that re-renders from the server after visibility changes.
pub trait View {
    /// Reloads the whole view.
    fn reload(&mut self);
}

impl<F: FnMut()> View for F {
    fn reload(&mut self) {
        self()
    }
}

/// Runs query round trips against a [`RemoteStore`].
#[derive(Debug, Clone, Default)]
pub struct RemoteFilter<S> {
    store: S,
}

impl<S: RemoteStore> RemoteFilter<S> {
    pub fn new(store: S) -> Self {
        RemoteFilter { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Persists `text`, computes the keep-set on the server's rows, posts
    /// it, then reloads `view`. Blank text clears filtering instead.
    ///
    /// Returns the action that was posted.
    pub fn apply_query<V: View + ?Sized>(&mut self, text: &str, view: &mut V) -> Result<Action> {
        if text.trim().is_empty() {
            debug!("clearing remote filter");
            let action = Action::All;
            self.store.post_action(&action)?;
            view.reload();
            return Ok(action);
        }

        let query = Query::compile(text)?;
        self.store.set_query(text)?;

        let table = self.store.fetch_rows()?.into_table();
        let keep = compute_keep_set(table.rows(), Some(&query))?;
        info!(
            "query {:?} keeps {} of {} remote rows",
            text,
            keep.len(),
            table.len()
        );

        let action = Action::show(&keep);
        self.store.post_action(&action)?;
        view.reload();
        Ok(action)
    }
}
