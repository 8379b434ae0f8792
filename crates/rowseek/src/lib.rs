//! Rowseek - filter and sort table rows with short column expressions.
//!
//! Users type queries such as `$1 > 3` or `|$1 - $2| < 0.5` to decide which
//! rows of a table stay visible, and pick a column to sort by. Rowseek
//! provides:
//!
//! - A translator from the surface syntax (`$N`, `|E|`) to a closed
//!   expression grammar
//! - A recursive-descent parser and tree-walking evaluator for that grammar
//! - Keep-set computation over a table, all-or-nothing on errors
//! - A coercing column sort that mixes numeric and text cells
//!
//! # Quick Start
//!
//! ```rust
//! use rowseek::{Dir, SortState, Table};
//!
//! let mut table = Table::from_records(vec![
//!     ("mol-1", vec!["0.8", "4.1"]),
//!     ("mol-2", vec!["-2.5", "3.9"]),
//!     ("mol-3", vec!["1.7", "n/a"]),
//! ])
//! .with_names(["dde", "rmsd"]);
//!
//! // Keep rows whose first column is at least 1 in magnitude
//! let kept = table.apply_query("|$1| >= 1").unwrap();
//! assert_eq!(kept.len(), 2);
//!
//! // Sort by the first column (absolute values, ascending)
//! let mut state = SortState::new();
//! table.sort_by_column(1, &mut state);
//! assert_eq!(state.dir(), Dir::Asc);
//! assert_eq!(table.rows()[0].label(), "mol-1");
//! ```
//!
//! # Query Syntax
//!
//! | Form | Meaning |
//! |------|---------|
//! | `$N` | Value of data column `N` (1-9) of the current row |
//! | `\|E\|` | Absolute value of `E` |
//! | `+ - * / %` | Arithmetic |
//! | `< <= > >= == != === !==` | Comparison |
//! | `&& \|\| !` | Boolean connectives |
//!
//! Cells that are not numbers evaluate as NaN, which fails every comparison.
//! An empty query keeps every row.

mod error;
mod expr;
mod lexer;
mod op;
mod ordering;
mod parser;
mod query;
mod table;
mod traits;
mod translate;
mod value;

// Re-export public API
pub use error::{Result, SeekError};
pub use expr::Expr;
pub use op::{BinaryOp, UnaryOp};
pub use ordering::{sort_by_column, Dir, SortKey, SortState};
pub use parser::{parse, MAX_DEPTH};
pub use query::{compute_keep_set, evaluate, Query};
pub use table::{KeepSet, Row, RowId, Table};
pub use traits::Columns;
pub use translate::translate;
pub use value::{parse_number, Value};
