//! Environment variable helpers
//!
//! Blank values are treated the same as unset ones.

use std::str::FromStr;

/// Read an environment variable, ignoring unset and whitespace-only values.
pub fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse an environment variable; unparseable values count as unset.
pub fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    non_empty_var(name).and_then(|v| v.parse::<T>().ok())
}
