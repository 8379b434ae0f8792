//! Surface-syntax rewriting.
//!
//! Users write `$N` for "column N of this row" and `|E|` for "absolute value
//! of E". [`translate`] rewrites both into the expression grammar understood
//! by the parser:
//!
//! ```text
//! |$1 - $2| < 1   =>   abs(vals[1] - vals[2]) < 1
//! ```
//!
//! Absolute-value bars are rewritten first, column references second.
//! Two adjacent bars (`||`) are always the logical-or operator.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SeekError};

static COLUMN_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(\d)").expect("column reference pattern is valid"));

/// Rewrites a surface query into a translated expression.
///
/// A query without `$` or `|` comes back unchanged. Empty queries are not
/// special-cased here; callers treat them as "match all" before translating
/// (see [`Query::compile`](crate::Query::compile)).
///
/// # Errors
///
/// Returns [`SeekError::MalformedQuery`] for an unmatched `|` or an empty
/// `| |` pair.
///
/// # Example
///
/// ```
/// use rowseek::translate;
///
/// assert_eq!(translate("$1 > 3").unwrap(), "vals[1] > 3");
/// assert_eq!(translate("|$1 - $2| < 1").unwrap(), "abs(vals[1] - vals[2]) < 1");
/// assert!(translate("|$1 > 3").is_err());
/// ```
pub fn translate(query: &str) -> Result<String> {
    let with_abs = rewrite_abs(query)?;
    Ok(COLUMN_REF.replace_all(&with_abs, "vals[$1]").into_owned())
}

fn rewrite_abs(query: &str) -> Result<String> {
    if !query.contains('|') {
        return Ok(query.to_string());
    }

    let mut out = String::with_capacity(query.len() + 8);
    let mut chars = query.chars().peekable();
    // Byte offset in `out` where the open abs body starts
    let mut open: Option<usize> = None;

    while let Some(c) = chars.next() {
        if c != '|' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'|') {
            chars.next();
            out.push_str("||");
            continue;
        }
        match open.take() {
            None => {
                out.push_str("abs(");
                open = Some(out.len());
            }
            Some(start) => {
                if out[start..].trim().is_empty() {
                    return Err(SeekError::malformed(query, "empty `| |` expression"));
                }
                out.push(')');
            }
        }
    }

    if open.is_some() {
        return Err(SeekError::malformed(query, "unmatched `|`"));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_without_tokens() {
        assert_eq!(translate("1 + 2 > 2").unwrap(), "1 + 2 > 2");
        assert_eq!(translate("").unwrap(), "");
    }

    #[test]
    fn column_references() {
        assert_eq!(translate("$1 > 3").unwrap(), "vals[1] > 3");
        assert_eq!(
            translate("$1 + $9 == $2").unwrap(),
            "vals[1] + vals[9] == vals[2]"
        );
    }

    #[test]
    fn only_single_digit_references() {
        // The second digit is left behind and fails to parse later
        assert_eq!(translate("$12 > 0").unwrap(), "vals[1]2 > 0");
    }

    #[test]
    fn dollar_without_digit_is_verbatim() {
        assert_eq!(translate("$x > 0").unwrap(), "$x > 0");
    }

    #[test]
    fn absolute_value() {
        assert_eq!(
            translate("|$1 - $2| < 1").unwrap(),
            "abs(vals[1] - vals[2]) < 1"
        );
        assert_eq!(
            translate("|$1| > 2 && |$2| < 1").unwrap(),
            "abs(vals[1]) > 2 && abs(vals[2]) < 1"
        );
    }

    #[test]
    fn double_bar_is_logical_or() {
        assert_eq!(
            translate("$1 > 0 || $2 > 0").unwrap(),
            "vals[1] > 0 || vals[2] > 0"
        );
        assert_eq!(
            translate("$1 > 0 || |$2| > 0").unwrap(),
            "vals[1] > 0 || abs(vals[2]) > 0"
        );
    }

    #[test]
    fn unmatched_bar_is_malformed() {
        let err = translate("|$1 > 3").unwrap_err();
        assert!(matches!(err, SeekError::MalformedQuery { .. }));

        let err = translate("|$1| > |3").unwrap_err();
        assert!(matches!(err, SeekError::MalformedQuery { .. }));
    }

    #[test]
    fn empty_bars_are_malformed() {
        let err = translate("| | > 3").unwrap_err();
        assert!(matches!(err, SeekError::MalformedQuery { .. }));
    }

    #[test]
    fn error_names_the_query() {
        let err = translate("|$1").unwrap_err();
        assert_eq!(err.to_string(), "malformed query `|$1`: unmatched `|`");
    }
}
