//! Wire types for the FX endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ExchangeQuote, TransferOrder};
use crate::shared::Currency;

/// `GET /api/fx/get-rate-v2`.
#[derive(Debug, Clone, Deserialize)]
pub struct FxRatesResponse {
    pub fx_currencies: Vec<ExchangeQuote>,
}

/// Body of `POST /api/fx/create-order`. Amounts go out as JSON numbers.
#[derive(Debug, Clone, Serialize)]
pub struct CreateFxOrderRequest<'a> {
    pub acting_as_id: &'a str,
    pub source_currency: &'a Currency,
    pub target_currency: &'a Currency,
    #[serde(with = "rust_decimal::serde::float")]
    pub quoted_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub source_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub target_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub source_fee: Decimal,
    pub buy_or_sell: &'static str,
}

impl<'a> CreateFxOrderRequest<'a> {
    pub fn new(acting_as_id: &'a str, order: &'a TransferOrder) -> Self {
        Self {
            acting_as_id,
            source_currency: &order.source_currency,
            target_currency: &order.target_currency,
            quoted_rate: order.quoted_rate,
            source_amount: order.source_amount,
            target_amount: order.target_amount,
            source_fee: order.source_fee,
            buy_or_sell: order.direction,
        }
    }
}
