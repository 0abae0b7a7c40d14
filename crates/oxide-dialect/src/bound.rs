//! LIMIT/OFFSET values.
//!
//! Callers hand over limits and offsets either as numbers or as raw text
//! taken from user input. Text is parsed with base prefixes (`0x`, `0o`,
//! `0b`, leading `0` for octal) and `_` digit separators.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DialectError, Result};

/// A LIMIT or OFFSET value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowBound {
    /// An already numeric value.
    Number(i64),
    /// Raw text, parsed when the clause is built.
    Text(String),
}

impl RowBound {
    /// Resolves the bound to an integer.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidBound`] if the text is not an integer
    /// or does not fit in an `i64`.
    pub fn resolve(&self) -> Result<i64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(text) => parse_int(text).ok_or_else(|| DialectError::InvalidBound {
                value: text.clone(),
            }),
        }
    }
}

impl fmt::Display for RowBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for RowBound {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for RowBound {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<u32> for RowBound {
    fn from(n: u32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<&str> for RowBound {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RowBound {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Parses a signed integer, detecting the base from its prefix.
fn parse_int(input: &str) -> Option<i64> {
    let (negative, unsigned) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    if unsigned.is_empty() {
        return None;
    }
    if unsigned.contains('_') && !underscores_ok(unsigned) {
        return None;
    }

    let (radix, digits) = split_radix(unsigned);
    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = u64::from_str_radix(&digits, radix).ok()?;

    let value = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(value).ok()
}

fn split_radix(s: &str) -> (u32, &str) {
    let bytes = s.as_bytes();
    if bytes[0] != b'0' || bytes.len() == 1 {
        return (10, s);
    }
    if bytes.len() >= 3 {
        match bytes[1].to_ascii_lowercase() {
            b'x' => return (16, &s[2..]),
            b'o' => return (8, &s[2..]),
            b'b' => return (2, &s[2..]),
            _ => {}
        }
    }
    (8, &s[1..])
}

/// Underscores may only separate digits, or a base prefix from a digit.
fn underscores_ok(s: &str) -> bool {
    #[derive(PartialEq)]
    enum Seen {
        Start,
        Digit,
        Underscore,
        Other,
    }

    let bytes = s.as_bytes();
    let mut seen = Seen::Start;
    let mut i = 0;
    let mut hex = false;

    if bytes.len() >= 2
        && bytes[0] == b'0'
        && matches!(bytes[1].to_ascii_lowercase(), b'b' | b'o' | b'x')
    {
        i = 2;
        seen = Seen::Digit;
        hex = bytes[1].to_ascii_lowercase() == b'x';
    }

    for &b in &bytes[i..] {
        if b.is_ascii_digit() || (hex && b.is_ascii_hexdigit()) {
            seen = Seen::Digit;
            continue;
        }
        if b == b'_' {
            if seen != Seen::Digit {
                return false;
            }
            seen = Seen::Underscore;
            continue;
        }
        if seen == Seen::Underscore {
            return false;
        }
        seen = Seen::Other;
    }
    seen != Seen::Underscore
}
