//! Raw configuration values and their coercions.
//!
//! Values parsed from a config file or read from the environment are always
//! strings. A value stored programmatically through [`crate::Registry::set`]
//! keeps its original type until the next save and reload.
//!
//! Coercions never fail: an unparseable value becomes the target type's zero
//! value.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A raw configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl Value {
    /// The value returned for keys that resolve to nothing.
    pub fn empty() -> Self {
        Value::String(String::new())
    }

    /// Returns true for the empty string.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::String(s) if s.is_empty())
    }

    /// Borrow the value if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret the value as a boolean.
    ///
    /// Strings accept `1 t T TRUE true True` and `0 f F FALSE false False`;
    /// anything else is `false`. Numbers are true when non-zero.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::String(s) => parse_bool(s.trim()).unwrap_or(false),
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
        }
    }

    pub fn to_i64(&self) -> i64 {
        match self {
            Value::String(s) => s.trim().parse().unwrap_or(0),
            Value::Bool(b) => i64::from(*b),
            Value::Int(i) => *i,
            Value::Float(f) => *f as i64,
        }
    }

    pub fn to_i32(&self) -> i32 {
        i32::try_from(self.to_i64()).unwrap_or(0)
    }

    /// Interpret the value as an unsigned integer; negative values become 0.
    pub fn to_u64(&self) -> u64 {
        match self {
            Value::String(s) => s.trim().parse().unwrap_or(0),
            Value::Bool(b) => u64::from(*b),
            Value::Int(i) => u64::try_from(*i).unwrap_or(0),
            Value::Float(f) if *f > 0.0 => *f as u64,
            Value::Float(_) => 0,
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Value::String(s) => s.trim().parse().unwrap_or(0.0),
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Int(i) => *i as f64,
            Value::Float(f) => *f,
        }
    }

    /// Interpret the value as a duration.
    ///
    /// A bare integer is a count of nanoseconds. Otherwise the value is a
    /// sequence of `<number><unit>` pairs such as `1h30m` or `1.5s`, with
    /// units `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`.
    pub fn to_duration(&self) -> Duration {
        match self {
            Value::String(s) => parse_duration(s).unwrap_or_default(),
            Value::Int(i) => u64::try_from(*i).map(Duration::from_nanos).unwrap_or_default(),
            Value::Float(f) if *f > 0.0 => Duration::from_nanos(*f as u64),
            Value::Float(_) | Value::Bool(_) => Duration::ZERO,
        }
    }

    /// Split the value into whitespace-separated fields.
    pub fn to_string_list(&self) -> Vec<String> {
        self.to_string()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(3_600 * 1_000_000_000),
        _ => None,
    }
}

const MAX_FRACTION_DIGITS: usize = 18;

pub(crate) fn parse_duration(input: &str) -> Option<Duration> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(nanos) = s.parse::<u64>() {
        return Some(Duration::from_nanos(nanos));
    }

    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let mut total: u128 = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let number_len = rest.find(|c: char| !is_number(c)).unwrap_or(rest.len());
        if number_len == 0 {
            return None;
        }
        let (number, tail) = rest.split_at(number_len);
        let unit_len = tail.find(is_number).unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let scale = unit_nanos(unit)?;

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        total = total.checked_add(whole.checked_mul(scale)?)?;
        if !fraction.is_empty() {
            // Digits past this point contribute less than a nanosecond even
            // for hours, and more would overflow the divisor.
            let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
            let digits: u128 = fraction.parse().ok()?;
            let divisor = 10u128.checked_pow(u32::try_from(fraction.len()).ok()?)?;
            total = total.checked_add(digits.checked_mul(scale)? / divisor)?;
        }
        rest = tail;
    }

    let secs = u64::try_from(total / 1_000_000_000).ok()?;
    let nanos = (total % 1_000_000_000) as u32;
    Some(Duration::new(secs, nanos))
}
