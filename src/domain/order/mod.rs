//! Order domain — market buys, sells, auto-invest schedules, order history.

pub mod client;
pub mod wire;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::SdkError;
use crate::shared::FundId;

/// Fee the buy endpoint expects the client to quote up front.
pub const BUY_FEE_RATE: Decimal = dec!(0.005);

/// How often an auto-invest order runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoInvestInterval {
    Weekly,
    Fortnightly,
    Monthly,
}

/// One fund's share of an auto-invest order.
///
/// `allocation` is a percentage and is sent as a decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub fund_id: FundId,
    pub allocation: Decimal,
}

impl Allocation {
    pub fn new(fund_id: impl Into<FundId>, allocation: Decimal) -> Self {
        Self {
            fund_id: fund_id.into(),
            allocation,
        }
    }
}

/// A DIY auto-invest order.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoInvestOrder {
    pub order_name: String,
    pub amount: Decimal,
    pub interval: AutoInvestInterval,
    pub start: NaiveDate,
    pub allocations: Vec<Allocation>,
}

/// Expected fee for a buy of `amount`.
pub fn expected_buy_fee(amount: Decimal) -> Result<Decimal, SdkError> {
    amount
        .checked_mul(BUY_FEE_RATE)
        .ok_or_else(|| SdkError::Validation(format!("buy amount {} is out of range", amount)))
}
