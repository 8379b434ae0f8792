//! Remote persistence for rowseek queries.
//!
//! A persistence server owns the authoritative rows. This crate sends the
//! raw query text and the resulting keep-set to it, using a small JSON
//! protocol:
//!
//! | Request | Body | Meaning |
//! |---------|------|---------|
//! | `POST /set-query` | `"<query text>"` | Persist the query |
//! | `GET /api` | | Fetch rows as a [`Snapshot`] |
//! | `POST /api` | `{"Show":[0,2]}` | Show only these positions |
//! | `POST /api` | `{"All":null}` | Show every row |
//!
//! # Example
//!
//! ```rust
//! use rowseek_remote::{Action, Cell, MemoryStore, RemoteFilter, SnapshotRow};
//!
//! let store = MemoryStore::new(vec![
//!     SnapshotRow::new("a", vec![Cell::from(0.2)]),
//!     SnapshotRow::new("b", vec![Cell::from(-7.5)]),
//! ]);
//! let mut filter = RemoteFilter::new(store);
//!
//! let mut reloaded = false;
//! let action = filter.apply_query("|$1| > 1", &mut || reloaded = true).unwrap();
//! assert_eq!(action, Action::Show(vec![1]));
//! assert!(reloaded);
//! ```
//!
//! Use [`HttpStore`] to talk to a real server.

mod action;
mod config;
mod error;
mod filter;
mod http;
mod store;

pub use action::{Action, Cell, Snapshot, SnapshotRow};
pub use config::{RemoteConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{RemoteError, Result, Step};
pub use filter::{RemoteFilter, View};
pub use http::HttpStore;
pub use store::{MemoryStore, RemoteStore, Request};
