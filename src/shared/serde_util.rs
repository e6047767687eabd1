//! Custom serde helpers for backend wire formats.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Reads a decimal the backend may send as a string or a JSON number.
/// `null` reads as `None`.
fn decimal_from_value(value: &Value) -> Result<Option<Decimal>, String> {
    let text = match value {
        Value::Null => return Ok(None),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => return Err(format!("expected a decimal string or number, got {}", other)),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Some)
        .map_err(|e| format!("invalid decimal {:?}: {}", text, e))
}

/// A required decimal that may arrive as a string or a number.
pub mod lenient_decimal {
    use rust_decimal::Decimal;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        super::decimal_from_value(&value)
            .map_err(D::Error::custom)?
            .ok_or_else(|| D::Error::custom("decimal is null"))
    }
}

/// A map of decimals whose values may be strings, numbers or `null`.
///
/// `null` entries read as zero.
pub mod lenient_decimal_map {
    use std::collections::HashMap;
    use std::hash::Hash;

    use rust_decimal::Decimal;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D, K>(deserializer: D) -> Result<HashMap<K, Decimal>, D::Error>
    where
        D: Deserializer<'de>,
        K: Deserialize<'de> + Eq + Hash,
    {
        HashMap::<K, Value>::deserialize(deserializer)?
            .into_iter()
            .map(|(key, value)| {
                let amount = super::decimal_from_value(&value).map_err(D::Error::custom)?;
                Ok((key, amount.unwrap_or(Decimal::ZERO)))
            })
            .collect()
    }
}
