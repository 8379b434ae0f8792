//! Column sorting with per-cell type coercion.
//!
//! Provides [`Dir`] for sort direction, [`SortKey`] for the comparable form
//! of a cell, [`SortState`] for the outcome of the last sort, and
//! [`sort_by_column`] which reorders rows in place.
//!
//! The sort is a restart-on-first-swap bubble sort: every pass walks adjacent
//! pairs, swaps the first pair that is out of order and starts over. A sort
//! always begins ascending; if the very first clean pass happens before any
//! swap (the column was already ascending) the direction flips once to
//! descending and sorting continues. Repeating a sort on the same column
//! therefore toggles between ascending and descending.

use std::cmp::Ordering;

use log::debug;

use crate::traits::Columns;
use crate::value::parse_number;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Returns the opposite direction.
    pub fn reverse(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Returns `true` if `a` directly before `b` violates this direction.
    ///
    /// Pairs that cannot be compared (see [`SortKey::compare`]) never
    /// violate either direction.
    pub fn is_violated_by(self, a: &SortKey, b: &SortKey) -> bool {
        let ordering = a.compare(b);
        match self {
            Dir::Asc => ordering == Some(Ordering::Greater),
            Dir::Desc => ordering == Some(Ordering::Less),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Comparable form of a cell.
///
/// A cell whose text parses to a nonzero number sorts by the *absolute*
/// value of that number; any other cell (text, blank, zero) sorts by its
/// lowercased text. The sign is dropped on purpose: `-5` and `5` sort
/// together.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// Absolute value of a nonzero numeric cell.
    Number(f64),
    /// Lowercased text of any other cell.
    Text(String),
}

impl SortKey {
    /// Coerces cell text into a sort key.
    ///
    /// ```
    /// use rowseek::SortKey;
    ///
    /// assert_eq!(SortKey::from_text("-2.5"), SortKey::Number(2.5));
    /// assert_eq!(SortKey::from_text("Beta"), SortKey::Text("beta".into()));
    /// assert_eq!(SortKey::from_text("0"), SortKey::Text("0".into()));
    /// ```
    pub fn from_text(text: &str) -> Self {
        let n = parse_number(text).abs();
        if n != 0.0 && !n.is_nan() {
            SortKey::Number(n)
        } else {
            SortKey::Text(text.to_lowercase())
        }
    }

    /// Sort key of one column of a row. Missing columns sort as empty text.
    pub fn of<R: Columns + ?Sized>(row: &R, column: usize) -> Self {
        SortKey::from_text(row.column_text(column).unwrap_or_default())
    }

    /// Numeric view used when a text key meets a number key.
    pub fn to_number(&self) -> f64 {
        match self {
            SortKey::Number(n) => *n,
            SortKey::Text(t) => parse_number(t),
        }
    }

    /// Compares two keys.
    ///
    /// Two text keys compare by UTF-16 code units. Any pair involving a
    /// number compares numerically after converting text with
    /// [`parse_number`]; if that yields NaN the keys are incomparable and
    /// `None` is returned.
    pub fn compare(&self, other: &SortKey) -> Option<Ordering> {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => Some(a.encode_utf16().cmp(b.encode_utf16())),
            _ => self.to_number().partial_cmp(&other.to_number()),
        }
    }
}

/// Outcome of the most recent [`sort_by_column`] call on a table.
///
/// The state is owned by the caller and passed in explicitly; each call
/// overwrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    column: Option<usize>,
    dir: Dir,
    passes: usize,
    swaps: usize,
}

impl SortState {
    /// Creates a fresh state; nothing has been sorted yet.
    pub fn new() -> Self {
        SortState::default()
    }

    /// Column of the last sort, if any.
    pub fn column(&self) -> Option<usize> {
        self.column
    }

    /// Direction the last sort finished in.
    pub fn dir(&self) -> Dir {
        self.dir
    }

    /// Number of passes the last sort made.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Number of swaps the last sort made.
    pub fn swaps(&self) -> usize {
        self.swaps
    }

    /// Returns `true` if the last sort flipped to descending.
    pub fn toggled(&self) -> bool {
        self.dir.is_desc()
    }
}

/// Reorders rows in place by the sort keys of one column.
///
/// Keys are recomputed on every comparison. The direction starts ascending
/// and flips at most once per call; see the module docs. Worst case is
/// quadratic in the number of rows.
///
/// ```
/// use rowseek::{sort_by_column, Dir, SortState};
///
/// let mut rows = vec![vec!["10"], vec!["2"], vec!["b"], vec!["a"]];
/// let mut state = SortState::new();
///
/// sort_by_column(&mut rows, 1, &mut state);
/// assert_eq!(rows, [["2"], ["10"], ["a"], ["b"]]);
/// assert_eq!(state.dir(), Dir::Asc);
///
/// // Already ascending: the next call flips to descending
/// sort_by_column(&mut rows, 1, &mut state);
/// assert_eq!(state.dir(), Dir::Desc);
/// ```
pub fn sort_by_column<R: Columns>(rows: &mut [R], column: usize, state: &mut SortState) {
    let mut dir = Dir::Asc;
    let mut passes = 0;
    let mut swaps = 0;

    loop {
        passes += 1;
        let violation = (1..rows.len()).find(|&i| {
            let a = SortKey::of(&rows[i - 1], column);
            let b = SortKey::of(&rows[i], column);
            dir.is_violated_by(&a, &b)
        });

        match violation {
            Some(i) => {
                rows.swap(i - 1, i);
                swaps += 1;
            }
            None if swaps == 0 && dir.is_asc() => dir = dir.reverse(),
            None => break,
        }
    }

    debug!(
        "sorted column {} {} in {} passes with {} swaps",
        column, dir, passes, swaps
    );
    *state = SortState {
        column: Some(column),
        dir,
        passes,
        swaps,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(rows: &[Vec<&'static str>]) -> Vec<&'static str> {
        rows.iter().map(|r| r[0]).collect()
    }

    fn is_fixed_point(rows: &[Vec<&str>], dir: Dir) -> bool {
        rows.windows(2).all(|pair| {
            !dir.is_violated_by(&SortKey::of(&pair[0], 1), &SortKey::of(&pair[1], 1))
        })
    }

    #[test]
    fn dir_reverse_and_display() {
        assert_eq!(Dir::Asc.reverse(), Dir::Desc);
        assert_eq!(Dir::Desc.reverse(), Dir::Asc);
        assert_eq!(Dir::Asc.to_string(), "asc");
        assert_eq!(Dir::Desc.to_string(), "desc");
        assert_eq!(Dir::default(), Dir::Asc);
    }

    #[test]
    fn numeric_keys_drop_sign() {
        assert_eq!(SortKey::from_text("-10"), SortKey::Number(10.0));
        assert_eq!(SortKey::from_text(" 3 "), SortKey::Number(3.0));
    }

    #[test]
    fn zero_and_text_keys_are_lowercased_text() {
        assert_eq!(SortKey::from_text("0"), SortKey::Text("0".into()));
        assert_eq!(SortKey::from_text(""), SortKey::Text("".into()));
        assert_eq!(SortKey::from_text("ABC"), SortKey::Text("abc".into()));
        assert_eq!(SortKey::from_text("NaN"), SortKey::Text("nan".into()));
    }

    #[test]
    fn compare_numbers() {
        let a = SortKey::Number(2.0);
        let b = SortKey::Number(10.0);
        assert_eq!(a.compare(&b), Some(Ordering::Less));
        assert_eq!(b.compare(&a), Some(Ordering::Greater));
    }

    #[test]
    fn compare_text_lexicographically() {
        let a = SortKey::from_text("apple");
        let b = SortKey::from_text("Banana");
        assert_eq!(a.compare(&b), Some(Ordering::Less));
        // Text comparison, not numeric
        assert_eq!(
            SortKey::Text("10".into()).compare(&SortKey::Text("9".into())),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn compare_mixed_types() {
        let number = SortKey::Number(10.0);
        let word = SortKey::from_text("b");
        let zero = SortKey::from_text("0");

        // Word text is NaN as a number: incomparable
        assert_eq!(number.compare(&word), None);
        assert_eq!(word.compare(&number), None);
        // "0" text is 0 as a number
        assert_eq!(zero.compare(&number), Some(Ordering::Less));
    }

    #[test]
    fn sort_mixed_column_reaches_fixed_point() {
        let mut rows = vec![vec!["10"], vec!["2"], vec!["b"], vec!["a"]];
        let mut state = SortState::new();
        sort_by_column(&mut rows, 1, &mut state);

        assert_eq!(column(&rows), ["2", "10", "a", "b"]);
        assert_eq!(state.dir(), Dir::Asc);
        assert!(is_fixed_point(&rows, state.dir()));
    }

    #[test]
    fn sort_by_absolute_value() {
        let mut rows = vec![vec!["-5"], vec!["3"], vec!["-1"]];
        let mut state = SortState::new();
        sort_by_column(&mut rows, 1, &mut state);
        assert_eq!(column(&rows), ["-1", "3", "-5"]);
    }

    #[test]
    fn sorted_column_toggles_to_descending() {
        let mut rows = vec![vec!["1"], vec!["2"], vec!["3"]];
        let mut state = SortState::new();
        sort_by_column(&mut rows, 1, &mut state);

        assert_eq!(column(&rows), ["3", "2", "1"]);
        assert!(state.toggled());
        assert_eq!(state.swaps(), 3);
    }

    #[test]
    fn repeated_calls_alternate_direction() {
        let mut rows = vec![vec!["2"], vec!["3"], vec!["1"]];
        let mut state = SortState::new();

        sort_by_column(&mut rows, 1, &mut state);
        assert_eq!(column(&rows), ["1", "2", "3"]);
        assert_eq!(state.dir(), Dir::Asc);

        sort_by_column(&mut rows, 1, &mut state);
        assert_eq!(column(&rows), ["3", "2", "1"]);
        assert_eq!(state.dir(), Dir::Desc);

        sort_by_column(&mut rows, 1, &mut state);
        assert_eq!(column(&rows), ["1", "2", "3"]);
        assert_eq!(state.dir(), Dir::Asc);
    }

    #[test]
    fn equal_keys_stop_without_swapping() {
        let mut rows = vec![vec!["x"], vec!["X"]];
        let mut state = SortState::new();
        sort_by_column(&mut rows, 1, &mut state);
        assert_eq!(column(&rows), ["x", "X"]);
        // Clean in both directions: one flip, then stop
        assert_eq!(state.passes(), 2);
        assert_eq!(state.swaps(), 0);
        assert!(state.toggled());
    }

    #[test]
    fn empty_and_single_row_tables() {
        let mut rows: Vec<Vec<&str>> = Vec::new();
        let mut state = SortState::new();
        sort_by_column(&mut rows, 1, &mut state);
        assert_eq!(state.column(), Some(1));
        assert_eq!(state.passes(), 2);

        let mut rows = vec![vec!["only"]];
        sort_by_column(&mut rows, 1, &mut state);
        assert_eq!(column(&rows), ["only"]);
    }

    #[test]
    fn missing_column_sorts_as_empty_text() {
        let mut rows = vec![vec!["b", "1"], vec!["a"]];
        let mut state = SortState::new();
        sort_by_column(&mut rows, 2, &mut state);
        // The missing cell is "", which converts to 0 against a number
        assert_eq!(rows[0], vec!["a"]);
    }
}
