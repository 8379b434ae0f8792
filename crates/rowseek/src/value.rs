//! Runtime values and text-to-number coercion.
//!
//! Cells arrive as text. [`parse_number`] turns a cell into the number an
//! expression sees, and [`Value`] is what an expression evaluates to.

/// Result of evaluating an expression (or any sub-expression).
///
/// Booleans take part in arithmetic as `1` and `0`; numbers take part in
/// boolean logic through [`Value::is_truthy`].
///
/// # Example
///
/// ```
/// use rowseek::Value;
///
/// assert!(Value::Number(2.5).is_truthy());
/// assert!(!Value::Number(f64::NAN).is_truthy());
/// assert_eq!(Value::Bool(true).to_number(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Numeric value. Non-numeric cells show up here as NaN.
    Number(f64),
    /// Boolean value, produced by comparisons and `!`.
    Bool(bool),
}

impl Value {
    /// Returns `true` if this is a `Bool` value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Converts to a number for arithmetic and ordering.
    pub fn to_number(self) -> f64 {
        match self {
            Value::Number(n) => n,
            Value::Bool(true) => 1.0,
            Value::Bool(false) => 0.0,
        }
    }

    /// Truthiness used to decide whether a row is kept.
    ///
    /// `0`, `-0`, NaN and `false` are falsy; everything else is truthy.
    pub fn is_truthy(self) -> bool {
        match self {
            Value::Number(n) => n != 0.0 && !n.is_nan(),
            Value::Bool(b) => b,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Parses cell text the way a dynamically typed host converts text to a number.
///
/// - surrounding whitespace is ignored and blank text is `0`
/// - decimal, exponent and signed forms are accepted (`"-1.5e3"`, `".5"`, `"1."`)
/// - unsigned `0x`, `0o` and `0b` integer literals are accepted
/// - `Infinity`, `+Infinity` and `-Infinity` are accepted
/// - anything else is NaN, including `inf`, `nan` and `1_000`
///
/// ```
/// use rowseek::parse_number;
///
/// assert_eq!(parse_number(" 42 "), 42.0);
/// assert_eq!(parse_number(""), 0.0);
/// assert_eq!(parse_number("0x1f"), 31.0);
/// assert!(parse_number("abc").is_nan());
/// ```
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    if let Some(n) = parse_radix_literal(trimmed) {
        return n;
    }

    let (sign, body) = match trimmed.as_bytes()[0] {
        b'+' => (1.0, &trimmed[1..]),
        b'-' => (-1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    if body == "Infinity" {
        return sign * f64::INFINITY;
    }

    // Rust's float grammar also takes "inf" and "nan"; restrict to digits.
    let plain = body
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !plain {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(f64::NAN);
    }
    // Past u128 the digits are folded in as floats; only values beyond
    // f64::MAX become infinite
    let n = u128::from_str_radix(digits, radix)
        .map(|n| n as f64)
        .unwrap_or_else(|_| {
            digits
                .chars()
                .filter_map(|c| c.to_digit(radix))
                .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
        });
    Some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_checks() {
        assert!(Value::Bool(true).is_bool());
        assert!(!Value::Number(1.0).is_bool());
    }

    #[test]
    fn bool_coerces_to_number() {
        assert_eq!(Value::Bool(true).to_number(), 1.0);
        assert_eq!(Value::Bool(false).to_number(), 0.0);
    }

    #[test]
    fn truthiness() {
        assert!(Value::Number(-3.0).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(-0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
    }

    #[test]
    fn parse_plain_numbers() {
        assert_eq!(parse_number("5"), 5.0);
        assert_eq!(parse_number("-4.25"), -4.25);
        assert_eq!(parse_number("+7"), 7.0);
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("1."), 1.0);
        assert_eq!(parse_number("\t12\n"), 12.0);
    }

    #[test]
    fn parse_blank_is_zero() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("   "), 0.0);
    }

    #[test]
    fn parse_radix_literals() {
        assert_eq!(parse_number("0x10"), 16.0);
        assert_eq!(parse_number("0o17"), 15.0);
        assert_eq!(parse_number("0b101"), 5.0);
        assert!(parse_number("0x").is_nan());
        assert!(parse_number("0xZZ").is_nan());
        assert!(parse_number("-0x10").is_nan());
    }

    #[test]
    fn parse_wide_radix_literals() {
        let wide = parse_number(&format!("0x{}", "f".repeat(40)));
        assert!(wide.is_finite());
        assert!((wide / 16f64.powi(40) - 1.0).abs() < 1e-12);

        let bits = parse_number(&format!("0b1{}", "0".repeat(200)));
        assert_eq!(bits, 2f64.powi(200));

        assert_eq!(parse_number(&format!("0x{}", "f".repeat(300))), f64::INFINITY);
    }

    #[test]
    fn parse_infinity_spelling() {
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("infinity").is_nan());
        assert!(parse_number("NaN").is_nan());
    }

    #[test]
    fn parse_text_is_nan() {
        assert!(parse_number("abc").is_nan());
        assert!(parse_number("12abc").is_nan());
        assert!(parse_number("1_000").is_nan());
        assert!(parse_number(".").is_nan());
        assert!(parse_number("+-1").is_nan());
    }

    #[test]
    fn value_display() {
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }
}
