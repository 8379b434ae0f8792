//! Operators of the expression language.
//!
//! [`BinaryOp`] covers arithmetic, comparison, equality and the short-circuit
//! connectives; [`UnaryOp`] covers negation and logical not. Absolute value
//! is not an operator here: the `|E|` surface form is rewritten to `abs(E)`.

use std::cmp::Ordering;

use crate::value::Value;

/// Binary operator, grouped by the kind of result it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division (IEEE semantics, `x / 0` is infinite or NaN).
    Div,
    /// Remainder with the sign of the dividend.
    Rem,

    // Ordering comparisons
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,

    // Equality
    /// Loose equality; booleans compare as numbers.
    Eq,
    /// Loose inequality.
    Ne,
    /// Strict equality; a boolean never equals a number.
    StrictEq,
    /// Strict inequality.
    StrictNe,

    // Connectives
    /// Short-circuit and, yielding the deciding operand.
    And,
    /// Short-circuit or, yielding the deciding operand.
    Or,
}

impl BinaryOp {
    /// Returns `true` for `+ - * / %`.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem
        )
    }

    /// Returns `true` for `< <= > >=`.
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            BinaryOp::Gt | BinaryOp::Gte | BinaryOp::Lt | BinaryOp::Lte
        )
    }

    /// Returns `true` for the equality family.
    pub fn is_equality(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::StrictEq | BinaryOp::StrictNe
        )
    }

    /// Returns `true` for `&&` and `||`.
    pub fn is_connective(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    /// Binding power used by the parser; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            op if op.is_equality() => 3,
            op if op.is_ordering() => 4,
            BinaryOp::Add | BinaryOp::Sub => 5,
            _ => 6,
        }
    }

    /// Evaluates a comparison given the ordering of two numbers.
    ///
    /// `None` means at least one side was NaN: every comparison is false
    /// except the inequalities.
    pub fn eval_ordering(self, ordering: Option<Ordering>) -> bool {
        if !(self.is_ordering() || self.is_equality()) {
            return false;
        }
        let Some(ordering) = ordering else {
            return matches!(self, BinaryOp::Ne | BinaryOp::StrictNe);
        };
        match self {
            BinaryOp::Eq | BinaryOp::StrictEq => ordering == Ordering::Equal,
            BinaryOp::Ne | BinaryOp::StrictNe => ordering != Ordering::Equal,
            BinaryOp::Gt => ordering == Ordering::Greater,
            BinaryOp::Gte => ordering != Ordering::Less,
            BinaryOp::Lt => ordering == Ordering::Less,
            BinaryOp::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Applies a non-connective operator to two evaluated operands.
    ///
    /// Connectives need lazy evaluation of the right side and are handled
    /// by the expression evaluator; passing one here returns the right
    /// operand for `&&` and the left for `||` when both are already known.
    pub fn apply(self, lhs: Value, rhs: Value) -> Value {
        match self {
            op @ (BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem) => {
                Value::Number(op.arithmetic(lhs.to_number(), rhs.to_number()))
            }
            // Loose equality compares booleans as numbers too
            BinaryOp::Gt | BinaryOp::Gte | BinaryOp::Lt | BinaryOp::Lte | BinaryOp::Eq | BinaryOp::Ne => {
                let ordering = lhs.to_number().partial_cmp(&rhs.to_number());
                Value::Bool(self.eval_ordering(ordering))
            }
            BinaryOp::StrictEq | BinaryOp::StrictNe => {
                let ordering = if lhs.is_bool() == rhs.is_bool() {
                    lhs.to_number().partial_cmp(&rhs.to_number())
                } else {
                    // Different types are never strictly equal
                    Some(Ordering::Less)
                };
                Value::Bool(self.eval_ordering(ordering))
            }
            BinaryOp::And => {
                if lhs.is_truthy() {
                    rhs
                } else {
                    lhs
                }
            }
            BinaryOp::Or => {
                if lhs.is_truthy() {
                    lhs
                } else {
                    rhs
                }
            }
        }
    }

    fn arithmetic(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::Rem => a % b,
            _ => f64::NAN,
        }
    }

    /// Returns the source spelling of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Gt => ">",
            BinaryOp::Gte => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Lte => "<=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNe => "!==",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Arithmetic negation.
    Neg,
    /// Numeric conversion (`+x`).
    Plus,
    /// Logical not.
    Not,
}

impl UnaryOp {
    /// Applies this operator to an evaluated operand.
    pub fn apply(self, operand: Value) -> Value {
        match self {
            UnaryOp::Neg => Value::Number(-operand.to_number()),
            UnaryOp::Plus => Value::Number(operand.to_number()),
            UnaryOp::Not => Value::Bool(!operand.is_truthy()),
        }
    }

    /// Returns the source spelling of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
        }
    }
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_kind_checks() {
        assert!(BinaryOp::Add.is_arithmetic());
        assert!(BinaryOp::Rem.is_arithmetic());
        assert!(!BinaryOp::Gt.is_arithmetic());

        assert!(BinaryOp::Lte.is_ordering());
        assert!(!BinaryOp::Eq.is_ordering());

        assert!(BinaryOp::StrictNe.is_equality());
        assert!(!BinaryOp::And.is_equality());

        assert!(BinaryOp::Or.is_connective());
        assert!(!BinaryOp::Mul.is_connective());
    }

    #[test]
    fn precedence_order() {
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() > BinaryOp::Lt.precedence());
        assert!(BinaryOp::Lt.precedence() > BinaryOp::Eq.precedence());
        assert!(BinaryOp::Eq.precedence() > BinaryOp::And.precedence());
        assert!(BinaryOp::And.precedence() > BinaryOp::Or.precedence());
    }

    #[test]
    fn op_eval_ordering() {
        assert!(BinaryOp::Eq.eval_ordering(Some(Ordering::Equal)));
        assert!(!BinaryOp::Eq.eval_ordering(Some(Ordering::Less)));

        assert!(BinaryOp::Gt.eval_ordering(Some(Ordering::Greater)));
        assert!(!BinaryOp::Gt.eval_ordering(Some(Ordering::Equal)));

        assert!(BinaryOp::Gte.eval_ordering(Some(Ordering::Equal)));
        assert!(BinaryOp::Lte.eval_ordering(Some(Ordering::Less)));
        assert!(!BinaryOp::Lt.eval_ordering(Some(Ordering::Greater)));

        assert!(!BinaryOp::Add.eval_ordering(Some(Ordering::Equal)));
        assert!(!BinaryOp::Or.eval_ordering(None));
    }

    #[test]
    fn nan_comparisons_are_false_except_inequality() {
        assert!(!BinaryOp::Eq.eval_ordering(None));
        assert!(!BinaryOp::Gt.eval_ordering(None));
        assert!(!BinaryOp::Lte.eval_ordering(None));
        assert!(BinaryOp::Ne.eval_ordering(None));
        assert!(BinaryOp::StrictNe.eval_ordering(None));
    }

    #[test]
    fn arithmetic() {
        let five = Value::Number(5.0);
        let two = Value::Number(2.0);
        assert_eq!(BinaryOp::Add.apply(five, two), Value::Number(7.0));
        assert_eq!(BinaryOp::Sub.apply(five, two), Value::Number(3.0));
        assert_eq!(BinaryOp::Mul.apply(five, two), Value::Number(10.0));
        assert_eq!(BinaryOp::Div.apply(five, two), Value::Number(2.5));
        assert_eq!(BinaryOp::Rem.apply(five, two), Value::Number(1.0));
        assert_eq!(
            BinaryOp::Add.apply(Value::Bool(true), two),
            Value::Number(3.0)
        );
    }

    #[test]
    fn loose_and_strict_equality() {
        let one = Value::Number(1.0);
        let yes = Value::Bool(true);
        assert_eq!(BinaryOp::Eq.apply(one, yes), Value::Bool(true));
        assert_eq!(BinaryOp::StrictEq.apply(one, yes), Value::Bool(false));
        assert_eq!(BinaryOp::StrictNe.apply(one, yes), Value::Bool(true));
        assert_eq!(BinaryOp::StrictEq.apply(yes, yes), Value::Bool(true));
    }

    #[test]
    fn nan_equality() {
        let nan = Value::Number(f64::NAN);
        assert_eq!(BinaryOp::Eq.apply(nan, nan), Value::Bool(false));
        assert_eq!(BinaryOp::Ne.apply(nan, nan), Value::Bool(true));
    }

    #[test]
    fn connectives_yield_operands() {
        let zero = Value::Number(0.0);
        let three = Value::Number(3.0);
        assert_eq!(BinaryOp::And.apply(zero, three), zero);
        assert_eq!(BinaryOp::And.apply(three, zero), zero);
        assert_eq!(BinaryOp::Or.apply(zero, three), three);
        assert_eq!(BinaryOp::Or.apply(three, zero), three);
    }

    #[test]
    fn unary_ops() {
        assert_eq!(UnaryOp::Neg.apply(Value::Number(2.0)), Value::Number(-2.0));
        assert_eq!(UnaryOp::Plus.apply(Value::Bool(true)), Value::Number(1.0));
        assert_eq!(UnaryOp::Not.apply(Value::Number(0.0)), Value::Bool(true));
        assert_eq!(UnaryOp::Not.apply(Value::Bool(true)), Value::Bool(false));
    }

    #[test]
    fn op_display() {
        assert_eq!(BinaryOp::Gte.to_string(), ">=");
        assert_eq!(BinaryOp::StrictNe.to_string(), "!==");
        assert_eq!(UnaryOp::Not.to_string(), "!");
    }
}
