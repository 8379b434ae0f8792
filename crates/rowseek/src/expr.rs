//! Expression tree and tree-walking evaluation.

use crate::error::{Result, SeekError};
use crate::op::{BinaryOp, UnaryOp};
use crate::value::Value;

/// A parsed expression.
///
/// Column references are 1-based and index into a value array whose slot 0
/// is reserved, so `Column(1)` reads `vals[1]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Number(f64),
    /// `true` or `false`.
    Bool(bool),
    /// `vals[N]`, the Nth column of the current row.
    Column(usize),
    /// `abs(E)`.
    Abs(Box<Expr>),
    /// Prefix operator applied to a sub-expression.
    Unary(UnaryOp, Box<Expr>),
    /// Binary operator applied to two sub-expressions.
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Evaluates this expression against a row's value array.
    ///
    /// `vals[0]` is never read. `&&` and `||` only evaluate their right side
    /// when the left side does not already decide the result.
    ///
    /// # Errors
    ///
    /// Returns [`SeekError::ColumnOutOfRange`] when a column reference
    /// points past the end of `vals`.
    pub fn eval(&self, vals: &[f64]) -> Result<Value> {
        match self {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Column(column) => match vals.get(*column) {
                Some(v) if *column > 0 => Ok(Value::Number(*v)),
                _ => Err(SeekError::ColumnOutOfRange {
                    column: *column,
                    width: vals.len().saturating_sub(1),
                }),
            },
            Expr::Abs(inner) => Ok(Value::Number(inner.eval(vals)?.to_number().abs())),
            Expr::Unary(op, operand) => Ok(op.apply(operand.eval(vals)?)),
            Expr::Binary(op, lhs, rhs) if op.is_connective() => {
                let left = lhs.eval(vals)?;
                let decided = match op {
                    BinaryOp::And => !left.is_truthy(),
                    _ => left.is_truthy(),
                };
                if decided {
                    Ok(left)
                } else {
                    rhs.eval(vals)
                }
            }
            Expr::Binary(op, lhs, rhs) => {
                let left = lhs.eval(vals)?;
                let right = rhs.eval(vals)?;
                Ok(op.apply(left, right))
            }
        }
    }

    /// Highest column referenced anywhere in this expression, if any.
    pub fn max_column(&self) -> Option<usize> {
        match self {
            Expr::Number(_) | Expr::Bool(_) => None,
            Expr::Column(column) => Some(*column),
            Expr::Abs(inner) | Expr::Unary(_, inner) => inner.max_column(),
            Expr::Binary(_, lhs, rhs) => lhs.max_column().max(rhs.max_column()),
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Bool(b) => write!(f, "{}", b),
            Expr::Column(column) => write!(f, "vals[{}]", column),
            Expr::Abs(inner) => write!(f, "abs({})", inner),
            Expr::Unary(op, operand) => write!(f, "{}{}", op, operand),
            Expr::Binary(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op, rhs),
        }
    }
}
