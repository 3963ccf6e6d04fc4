use std::fmt;

use compact_str::{CompactString, ToCompactString};
use serde::{Deserialize, Serialize};

/// How a column stores its integer value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    #[default]
    #[serde(alias = "integer")]
    Numeric,
    #[serde(alias = "string", alias = "text")]
    Textual,
}

/// Column value as it is stored in a record.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    #[default]
    Null,
    Int(i64),
    Text(CompactString),
}

impl RawValue {
    /// Integer interpretation of the stored value. Null and non-numeric text read as `0`.
    pub fn as_int(&self) -> i64 {
        match self {
            RawValue::Null => 0,
            RawValue::Int(v) => *v,
            RawValue::Text(s) => parse_int(s),
        }
    }

    /// Like [`RawValue::as_int`], but `None` for text outside of `i64`.
    pub fn checked_int(&self) -> Option<i64> {
        match self {
            RawValue::Text(s) => match parse_leading_int(s) {
                (value, false) => Some(value),
                (_, true) => None,
            },
            _ => Some(self.as_int()),
        }
    }

    pub fn from_int(value: i64, representation: Representation) -> Self {
        match representation {
            Representation::Numeric => RawValue::Int(value),
            Representation::Textual => RawValue::Text(value.to_compact_string()),
        }
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Int(i64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.into())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value.into())
    }
}

impl From<CompactString> for RawValue {
    fn from(value: CompactString) -> Self {
        RawValue::Text(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Null, Into::into)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => Ok(()),
            RawValue::Int(v) => write!(f, "{v}"),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

/// Parses the leading integer of `text`.
///
/// Leading whitespace and a single sign are accepted, digits may be separated by single
/// underscores, and parsing stops at the first other character. Text without a leading integer
/// parses as `0`. Values outside of `i64` saturate, see [`RawValue::checked_int`].
pub fn parse_int(text: &str) -> i64 {
    parse_leading_int(text).0
}

/// Saturated leading integer and whether it overflowed.
fn parse_leading_int(text: &str) -> (i64, bool) {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    let mut overflow = false;
    let mut after_digit = false;
    for c in digits.bytes() {
        match c {
            b'0'..=b'9' => {
                let digit = i64::from(c - b'0');
                let next = value.checked_mul(10).and_then(|v| {
                    if negative { v.checked_sub(digit) } else { v.checked_add(digit) }
                });
                value = next.unwrap_or_else(|| {
                    overflow = true;
                    if negative { i64::MIN } else { i64::MAX }
                });
                after_digit = true;
            }
            b'_' if after_digit => after_digit = false,
            _ => break,
        }
    }

    (value, overflow)
}
