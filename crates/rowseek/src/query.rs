//! Query compilation and execution.
//!
//! A [`Query`] is compiled once from surface text (translate, then parse)
//! and evaluated per row by walking the expression tree.

use log::debug;

use crate::error::Result;
use crate::expr::Expr;
use crate::parser::parse;
use crate::table::{KeepSet, Row};
use crate::traits::Columns;
use crate::translate::translate;

/// A compiled row filter.
///
/// A query built from empty (or blank) text matches every row and never
/// evaluates anything.
///
/// # Example
///
/// ```
/// use rowseek::Query;
///
/// let query = Query::compile("|$1 - $2| < 1").unwrap();
/// assert_eq!(query.translated(), Some("abs(vals[1] - vals[2]) < 1"));
/// assert!(query.matches(&vec!["5", "4.2"]).unwrap());
/// assert!(!query.matches(&vec!["5", "1"]).unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    source: String,
    compiled: Option<Compiled>,
}

#[derive(Debug, Clone, PartialEq)]
struct Compiled {
    translated: String,
    expr: Expr,
}

impl Query {
    /// Creates a query that matches every row.
    pub fn all() -> Self {
        Query::default()
    }

    /// Compiles surface text into a query.
    ///
    /// # Errors
    ///
    /// Returns [`SeekError::MalformedQuery`](crate::SeekError::MalformedQuery)
    /// when the text cannot be translated and
    /// [`SeekError::Parse`](crate::SeekError::Parse) when the translation is
    /// not a valid expression.
    pub fn compile(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Query {
                source: text.to_string(),
                compiled: None,
            });
        }

        let translated = translate(text)?;
        let expr = parse(&translated)?;
        debug!("compiled query `{}` as {}", text, expr);

        Ok(Query {
            source: text.to_string(),
            compiled: Some(Compiled { translated, expr }),
        })
    }

    /// Returns the text this query was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the translated expression, or `None` for a match-all query.
    pub fn translated(&self) -> Option<&str> {
        self.compiled.as_ref().map(|c| c.translated.as_str())
    }

    /// Returns the expression tree, or `None` for a match-all query.
    pub fn expr(&self) -> Option<&Expr> {
        self.compiled.as_ref().map(|c| &c.expr)
    }

    /// Returns `true` if this query matches everything without evaluating.
    pub fn is_empty(&self) -> bool {
        self.compiled.is_none()
    }

    /// Tests a single row.
    ///
    /// # Errors
    ///
    /// Returns [`SeekError::ColumnOutOfRange`](crate::SeekError::ColumnOutOfRange)
    /// when the expression reads past the end of the row.
    pub fn matches<R: Columns + ?Sized>(&self, row: &R) -> Result<bool> {
        match &self.compiled {
            None => Ok(true),
            Some(compiled) => Ok(compiled.expr.eval(&row.values())?.is_truthy()),
        }
    }

    /// Computes the keep-set of this query over some rows.
    pub fn keep_set(&self, rows: &[Row]) -> Result<KeepSet> {
        compute_keep_set(rows, Some(self))
    }

    /// Counts matching rows.
    pub fn count<R: Columns>(&self, rows: &[R]) -> Result<usize> {
        let mut n = 0;
        for row in rows {
            if self.matches(row)? {
                n += 1;
            }
        }
        Ok(n)
    }
}

/// Evaluates a translated expression against one row.
///
/// This parses `translated` on every call; use [`Query::compile`] to
/// evaluate the same expression over many rows.
///
/// ```
/// use rowseek::{evaluate, translate};
///
/// let expr = translate("$1 > 3").unwrap();
/// assert!(evaluate(&expr, &vec!["5"]).unwrap());
/// assert!(!evaluate(&expr, &vec!["2"]).unwrap());
/// ```
pub fn evaluate<R: Columns + ?Sized>(translated: &str, row: &R) -> Result<bool> {
    let expr = parse(translated)?;
    Ok(expr.eval(&row.values())?.is_truthy())
}

/// Computes which rows a query keeps.
///
/// `None` or an empty query keeps every row. Otherwise rows are evaluated in
/// order and the first evaluation error aborts the whole computation, so a
/// broken query never yields a partial keep-set.
pub fn compute_keep_set(rows: &[Row], query: Option<&Query>) -> Result<KeepSet> {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return Ok(rows.iter().map(Row::id).collect());
    };

    let mut keep = KeepSet::new();
    for row in rows {
        if query.matches(row)? {
            keep.insert(row.id());
        }
    }
    Ok(keep)
}
