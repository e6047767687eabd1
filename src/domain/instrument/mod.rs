//! Instrument domain — listed shares, ETFs and managed funds.
//!
//! Instrument records are passed through as the backend sends them. The SDK
//! only reads `id` / `instrumentType` and injects `priceHistory`.

pub mod client;
pub mod wire;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SdkError;
use crate::shared::FundId;

/// Key the daily price history is stored under on each instrument.
pub const PRICE_HISTORY_KEY: &str = "priceHistory";

/// An opaque instrument record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instrument(Map<String, Value>);

impl Instrument {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn instrument_type(&self) -> Option<&str> {
        self.0.get("instrumentType").and_then(Value::as_str)
    }

    pub fn price_history(&self) -> Option<&Value> {
        self.0.get(PRICE_HISTORY_KEY)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    pub fn is_equity(&self) -> bool {
        self.instrument_type() == Some("equity")
    }

    pub(crate) fn fund_id(&self) -> Result<FundId, SdkError> {
        self.id()
            .map(FundId::from)
            .ok_or_else(|| SdkError::Validation("instrument record has no id".into()))
    }

    pub(crate) fn set_price_history(&mut self, history: Value) {
        self.0.insert(PRICE_HISTORY_KEY.to_string(), history);
    }
}

impl From<Map<String, Value>> for Instrument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
