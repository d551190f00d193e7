use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Length of a hex address including the `0x` prefix.
pub const HEX_ADDRESS_LEN: usize = 42;

/// A resolved chain account identifier in hex form (`0x` + 40 hex digits).
///
/// The original casing is preserved for display, but **equality and
/// hashing are case-insensitive**: `0xAbC…` and `0xabc…` are the same
/// account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Parse a hex address. Surrounding whitespace is ignored.
    pub fn parse_hex(input: &str) -> Result<Self, CoreError> {
        let trimmed = input.trim();
        if Self::is_hex_address(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(CoreError::InvalidFormat(format!(
                "expected 0x followed by 40 hex characters, got {trimmed:?}"
            )))
        }
    }

    /// Shape check only: `0x` (or `0X`) followed by exactly 40 hex digits.
    pub fn is_hex_address(s: &str) -> bool {
        s.len() == HEX_ADDRESS_LEN
            && (s.starts_with("0x") || s.starts_with("0X"))
            && s[2..].bytes().all(|b| b.is_ascii_hexdigit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form, used as the comparison key.
    pub fn canonical(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Case-insensitive comparison against a raw string.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }

    /// Shortened `0x1234…abcd` form for list rows.
    pub fn short(&self) -> String {
        if self.0.len() < 12 || !self.0.is_ascii() {
            return self.0.clone();
        }
        format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Address {}

impl std::hash::Hash for Address {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
