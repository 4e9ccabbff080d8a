//! Typed accessors over [`Registry::get`].
//!
//! Every accessor resolves through `get`, so the same precedence applies.
//! Values that do not coerce become the type's zero value.

use std::time::Duration;

use super::Registry;

impl Registry {
    pub fn get_string(&self, key: &str) -> String {
        self.get(key).to_string()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).to_bool()
    }

    pub fn get_i64(&self, key: &str) -> i64 {
        self.get(key).to_i64()
    }

    pub fn get_i32(&self, key: &str) -> i32 {
        self.get(key).to_i32()
    }

    pub fn get_u64(&self, key: &str) -> u64 {
        self.get(key).to_u64()
    }

    pub fn get_f64(&self, key: &str) -> f64 {
        self.get(key).to_f64()
    }

    /// See [`crate::Value::to_duration`] for the accepted formats.
    pub fn get_duration(&self, key: &str) -> Duration {
        self.get(key).to_duration()
    }

    /// Whitespace-separated fields of the value.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.get(key).to_string_list()
    }

    /// Size in bytes, accepting `kb`, `mb`, and `gb` suffixes (powers of 1024).
    pub fn get_size_in_bytes(&self, key: &str) -> u64 {
        parse_size_in_bytes(&self.get_string(key))
    }

    /// True if `key` resolves from the environment or the config file.
    ///
    /// An empty environment variable counts only when empty values are allowed.
    pub fn is_set(&self, key: &str) -> bool {
        self.resolve(key).is_present()
    }
}

pub(crate) fn parse_size_in_bytes(input: &str) -> u64 {
    let lowered = input.trim().to_lowercase();
    let (number, multiplier) = match lowered.strip_suffix('b') {
        Some(rest) => match rest.chars().last() {
            Some('k') => (&rest[..rest.len() - 1], 1u64 << 10),
            Some('m') => (&rest[..rest.len() - 1], 1 << 20),
            Some('g') => (&rest[..rest.len() - 1], 1 << 30),
            _ => (rest, 1),
        },
        None => (lowered.as_str(), 1),
    };

    number
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .unwrap_or(0)
}
