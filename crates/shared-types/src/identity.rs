use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// A wallet address in canonical lowercase hex form (`0x` + 40 hex digits).
///
/// This is the only "current user" handle authorization ever looks at. Two
/// addresses are equal iff their lowercased forms match; the newtype
/// normalizes at construction, so plain `==` is always the case-insensitive
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Parse and normalize a raw address string from an identity provider
    /// or API payload.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let normalized = raw.trim().to_ascii_lowercase();
        let digits = normalized.strip_prefix("0x").ok_or_else(|| {
            AppError::bad_request(format!("Wallet address must start with 0x: {}", raw))
        })?;
        if digits.len() != 40 {
            return Err(AppError::bad_request(format!(
                "Wallet address must be 40 hex digits, got {}",
                digits.len()
            )));
        }
        hex::decode(digits)
            .map_err(|_| AppError::bad_request(format!("Wallet address is not valid hex: {}", raw)))?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against an un-normalized string (e.g. a raw provider value).
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == raw.trim().to_ascii_lowercase()
    }

    /// Shortened `0x1234…abcd` form for display.
    pub fn abbreviated(&self) -> String {
        format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for WalletAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for WalletAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
