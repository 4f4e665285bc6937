//! Operand model and integer coercion
//!
//! An [`Operand`] is one input to [`add_two_numbers`](super::add_two_numbers).
//! Coercion turns it into an arbitrary-precision integer or reports why it
//! cannot be one.

use num_bigint::BigInt;
use num_traits::FromPrimitive;
use std::fmt;
use thiserror::Error;

/// Which argument of the addition an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    First,
    Second,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::First => write!(f, "num1"),
            Position::Second => write!(f, "num2"),
        }
    }
}

/// Errors produced by [`add_two_numbers`](super::add_two_numbers)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddError {
    #[error("{position}: no value provided")]
    Missing { position: Position },

    #[error("{position}: invalid literal {input}: {reason}")]
    InvalidNumber {
        position: Position,
        input: String,
        reason: &'static str,
    },
}

/// A single input value
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// No value at all
    Missing,
    Int(BigInt),
    Float(f64),
    /// Text that may hold a number, e.g. `"42"`, `" 7 "`, `"1_000"` or `"1e5"`.
    ///
    /// Besides ASCII, decimal digits from the full-width, Arabic-Indic,
    /// Extended Arabic-Indic and Devanagari blocks are accepted. Digits from
    /// other scripts are rejected. Single underscores may separate digits.
    Text(String),
}

impl Operand {
    /// Convert to an integer, truncating fractional values toward zero
    pub fn to_integer(&self, position: Position) -> Result<BigInt, AddError> {
        match self {
            Operand::Missing => Err(AddError::Missing { position }),
            Operand::Int(value) => Ok(value.clone()),
            Operand::Float(value) => {
                truncate(*value).map_err(|reason| self.rejected(position, reason))
            }
            Operand::Text(raw) => parse_text(raw).map_err(|reason| self.rejected(position, reason)),
        }
    }

    fn rejected(&self, position: Position, reason: &'static str) -> AddError {
        AddError::InvalidNumber {
            position,
            input: self.to_string(),
            reason,
        }
    }
}

/// Renders the way values appear in log lines and demo output.
///
/// Text is single-quoted with control characters escaped, so a value
/// containing a newline stays on one log line.
impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Missing => write!(f, "None"),
            Operand::Int(value) => write!(f, "{value}"),
            Operand::Float(value) => write!(f, "{value:?}"),
            Operand::Text(raw) => write!(f, "'{}'", raw.escape_debug()),
        }
    }
}

impl From<BigInt> for Operand {
    fn from(value: BigInt) -> Self {
        Operand::Int(value)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Int(BigInt::from(value))
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Int(BigInt::from(value))
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Float(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Text(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Text(value)
    }
}

impl<T: Into<Operand>> From<Option<T>> for Operand {
    fn from(value: Option<T>) -> Self {
        value.map_or(Operand::Missing, Into::into)
    }
}

const NOT_A_NUMBER: &str = "not a base-10 number";

fn truncate(value: f64) -> Result<BigInt, &'static str> {
    if !value.is_finite() {
        return Err("not a finite number");
    }
    BigInt::from_f64(value.trunc()).ok_or("not a finite number")
}

fn parse_text(raw: &str) -> Result<BigInt, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("empty string");
    }

    let normalized: String = trimmed.chars().map(normalize_digit).collect();
    let normalized = strip_digit_separators(&normalized).ok_or(NOT_A_NUMBER)?;

    if is_integer_literal(&normalized) {
        return normalized.parse::<BigInt>().map_err(|_| NOT_A_NUMBER);
    }
    match normalized.parse::<f64>() {
        Ok(value) if looks_like_float(&normalized) => truncate(value),
        _ => Err(NOT_A_NUMBER),
    }
}

/// Drop `_` separators, which are only valid between two digits
fn strip_digit_separators(s: &str) -> Option<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    for (i, c) in chars.iter().enumerate() {
        if *c != '_' {
            out.push(*c);
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| chars.get(j));
        let after = chars.get(i + 1);
        let between_digits = before.is_some_and(|c| c.is_ascii_digit())
            && after.is_some_and(|c| c.is_ascii_digit());
        if !between_digits {
            return None;
        }
    }
    Some(out)
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

// f64::from_str also takes "inf", "nan" and "infinity"; only decimal
// and exponent forms count as numbers here.
fn looks_like_float(s: &str) -> bool {
    let body = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    body.chars().any(|c| c.is_ascii_digit())
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
}

/// Zero code points of the decimal digit blocks accepted besides ASCII
const DIGIT_ZEROS: [u32; 4] = [
    0xFF10, // full-width
    0x0660, // Arabic-Indic
    0x06F0, // Extended Arabic-Indic
    0x0966, // Devanagari
];

fn normalize_digit(c: char) -> char {
    let code = c as u32;
    DIGIT_ZEROS
        .iter()
        .find(|zero| (**zero..**zero + 10).contains(&code))
        .and_then(|zero| char::from_digit(code - zero, 10))
        .unwrap_or(c)
}
