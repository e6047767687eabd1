//! Identifier newtypes shared by the domain slices, plus page aggregation.
//!
//! Both newtypes are plain JSON strings on the wire.

pub mod paging;
pub mod serde_util;

pub use paging::{Page, PageOptions};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ─── FundId ──────────────────────────────────────────────────────────────────

/// Instrument / fund identifier (a UUID string on the backend).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FundId(String);

impl FundId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FundId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FundId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for FundId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FundId(s.to_string()))
    }
}

// ─── Currency ────────────────────────────────────────────────────────────────

/// Wallet currency code as the backend spells it (`"nzd"`, `"usd"`, `"aud"`).
///
/// Matching is exact; no case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Currency {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fund_id_serializes_as_plain_string() {
        let id = FundId::from("abc-123");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""abc-123""#);
        let back: FundId = serde_json::from_str(r#""abc-123""#).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_currency_is_case_sensitive() {
        assert_ne!(Currency::from("nzd"), Currency::from("NZD"));
        assert_eq!(Currency::from("usd").to_string(), "usd");
    }
}
