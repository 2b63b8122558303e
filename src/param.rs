//! Numeric parameter normalization.
//!
//! Page sizes and indices may be given as integers, floats or numeric
//! strings. Every value goes through the same two steps: strings are parsed
//! into a number with [`parse_number`], then [`Param::to_integer`] checks
//! that the number is a finite, exact and safe integer.

use std::fmt;

use crate::error::PaginateError;

/// Largest integer a 64-bit float represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(i128),
    Float(f64),
    Text(String),
}

impl Param {
    /// Normalizes the value to an `i64`, naming the parameter in errors.
    pub fn to_integer(&self, name: &'static str) -> Result<i64, PaginateError> {
        let number = match self {
            Param::Int(value) => {
                if value.unsigned_abs() > MAX_SAFE_INTEGER as u128 {
                    return Err(PaginateError::UnsafeInteger {
                        name,
                        value: self.to_string(),
                    });
                }
                return Ok(*value as i64);
            }
            Param::Float(value) => *value,
            Param::Text(text) => parse_number(text),
        };

        if !number.is_finite() || number.fract() != 0.0 {
            return Err(PaginateError::NonInteger {
                name,
                value: self.to_string(),
            });
        }
        if number.abs() > MAX_SAFE_INTEGER as f64 {
            return Err(PaginateError::UnsafeInteger {
                name,
                value: self.to_string(),
            });
        }
        // -0.0 lands on 0
        Ok(number as i64)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Int(v) => write!(f, "{v}"),
            Param::Float(v) if v.is_nan() => f.write_str("NaN"),
            Param::Float(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Param::Float(v) => write!(f, "{v}"),
            Param::Text(s) => write!(f, "{s:?}"),
        }
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Param {
            fn from(value: $t) -> Self {
                Param::Int(value as i128)
            }
        })*
    };
}

from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float(value)
    }
}

impl From<f32> for Param {
    fn from(value: f32) -> Self {
        Param::Float(f64::from(value))
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_owned())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<&String> for Param {
    fn from(value: &String) -> Self {
        Param::Text(value.clone())
    }
}

/// Parses text the way a numeric-string conversion does: surrounding
/// whitespace is ignored, blank text is zero, and anything that is not a
/// decimal, radix-prefixed or `Infinity` literal is NaN.
pub fn parse_number(text: &str) -> f64 {
    let s = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    if s.is_empty() {
        return 0.0;
    }
    if let Some(value) = parse_radix(s) {
        return value;
    }

    let (sign, unsigned) = match s.as_bytes()[0] {
        b'+' => (1.0, &s[1..]),
        b'-' => (-1.0, &s[1..]),
        _ => (1.0, s),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    if !is_decimal_literal(unsigned) {
        return f64::NAN;
    }
    unsigned
        .parse::<f64>()
        .map(|v| sign * v)
        .unwrap_or(f64::NAN)
}

fn parse_radix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let mut acc = 0.0f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => acc = acc * radix as f64 + d as f64,
            None => return Some(f64::NAN),
        }
    }
    Some(acc)
}

fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = digits_from(0);
    let int_digits = i;
    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        let end = digits_from(i + 1);
        frac_digits = end - (i + 1);
        i = end;
    }
    if int_digits + frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let end = digits_from(i);
        if end == i {
            return false;
        }
        i = end;
    }
    i == bytes.len()
}
