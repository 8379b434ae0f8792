//! Column access for anything that can be filtered or sorted.
//!
//! [`Columns`] is the seam between the engine and row storage: the query
//! evaluator and the sort comparator only ever see column text through it.

use crate::value::parse_number;

/// Positional access to the text of a row's columns.
///
/// Column `0` is the row's label (its record id); columns `1..=width()` are
/// data columns. `$N` in a query reads data column `N`.
///
/// # Example
///
/// ```
/// use rowseek::Columns;
///
/// struct Reading {
///     station: String,
///     samples: Vec<String>,
/// }
///
/// impl Columns for Reading {
///     fn column_text(&self, column: usize) -> Option<&str> {
///         match column {
///             0 => Some(&self.station),
///             n => self.samples.get(n - 1).map(String::as_str),
///         }
///     }
///
///     fn width(&self) -> usize {
///         self.samples.len()
///     }
/// }
///
/// let r = Reading { station: "north".into(), samples: vec!["1.5".into(), "x".into()] };
/// let vals = r.values();
/// assert_eq!(vals[1], 1.5);
/// assert!(vals[2].is_nan());
/// ```
pub trait Columns {
    /// Returns the text of a column, or `None` past the end of the row.
    fn column_text(&self, column: usize) -> Option<&str>;

    /// Number of data columns (not counting the label).
    fn width(&self) -> usize;

    /// Builds the 1-indexed value array seen by expressions.
    ///
    /// Slot 0 is reserved and holds NaN; slot `i` holds data column `i`
    /// parsed with [`parse_number`]. Non-numeric text becomes NaN rather
    /// than failing the row.
    fn values(&self) -> Vec<f64> {
        let mut vals = Vec::with_capacity(self.width() + 1);
        vals.push(f64::NAN);
        for column in 1..=self.width() {
            vals.push(parse_number(self.column_text(column).unwrap_or_default()));
        }
        vals
    }
}

/// A bare list of cells: every entry is a data column and there is no label.
impl<S: AsRef<str>> Columns for [S] {
    fn column_text(&self, column: usize) -> Option<&str> {
        match column {
            0 => None,
            n => self.get(n - 1).map(AsRef::as_ref),
        }
    }

    fn width(&self) -> usize {
        self.len()
    }
}

impl<S: AsRef<str>> Columns for Vec<S> {
    fn column_text(&self, column: usize) -> Option<&str> {
        self.as_slice().column_text(column)
    }

    fn width(&self) -> usize {
        self.len()
    }
}
