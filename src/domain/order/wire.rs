//! Wire types for order endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Allocation, AutoInvestInterval, AutoInvestOrder};
use crate::shared::FundId;

/// Body of `POST /api/cart/immediate-buy-v2`.
#[derive(Debug, Clone, Serialize)]
pub struct BuyRequest<'a> {
    pub action: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub fund_id: &'a FundId,
    #[serde(with = "rust_decimal::serde::float")]
    pub expected_fee: Decimal,
    pub acting_as_id: &'a str,
}

/// Body of `POST /api/fund/sell`.
#[derive(Debug, Clone, Serialize)]
pub struct SellRequest<'a> {
    #[serde(with = "rust_decimal::serde::float")]
    pub shares: Decimal,
    pub fund_id: &'a FundId,
    pub acting_as_id: &'a str,
}

/// Body of `POST /api/autoinvest/set-diy-order`. With `order_id` it updates.
#[derive(Debug, Clone, Serialize)]
pub struct SetDiyOrderRequest<'a> {
    pub acting_as_id: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub interval: AutoInvestInterval,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<&'a str>,
    pub start: NaiveDate,
    pub allocations: &'a [Allocation],
    pub order_name: &'a str,
}

impl<'a> SetDiyOrderRequest<'a> {
    pub fn new(acting_as_id: &'a str, order: &'a AutoInvestOrder, order_id: Option<&'a str>) -> Self {
        Self {
            acting_as_id,
            amount: order.amount,
            interval: order.interval,
            order_id,
            start: order.start,
            allocations: &order.allocations,
            order_name: &order.order_name,
        }
    }
}

/// `GET /api/accounting/order-history-v4`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderHistoryResponse {
    pub orders: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order() -> AutoInvestOrder {
        AutoInvestOrder {
            order_name: "Kiwi mix".into(),
            amount: dec!(50),
            interval: AutoInvestInterval::Weekly,
            start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            allocations: vec![
                Allocation::new("fund-a", dec!(60)),
                Allocation::new("fund-b", dec!(40)),
            ],
        }
    }

    #[test]
    fn test_create_omits_order_id() {
        let order = order();
        let body = serde_json::to_value(SetDiyOrderRequest::new("user-1", &order, None)).unwrap();
        assert!(body.get("order_id").is_none());
        assert_eq!(body["start"], "2024-03-01");
        assert_eq!(body["interval"], "weekly");
        assert_eq!(body["allocations"][1]["allocation"], "40");
        assert_eq!(body["amount"].as_f64(), Some(50.0));
    }

    #[test]
    fn test_update_carries_order_id() {
        let order = order();
        let body =
            serde_json::to_value(SetDiyOrderRequest::new("user-1", &order, Some("ord-9"))).unwrap();
        assert_eq!(body["order_id"], "ord-9");
        assert_eq!(body["order_name"], "Kiwi mix");
    }
}
