//! Orders sub-client — buy, sell, auto-invest, order history.
//!
//! Every call here re-authenticates first. Submissions report success purely
//! from the HTTP status; the response body is not inspected.

use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::auth::AuthScope;
use crate::client::SharesiesClient;
use crate::domain::order::wire::{BuyRequest, OrderHistoryResponse, SellRequest, SetDiyOrderRequest};
use crate::domain::order::{expected_buy_fee, AutoInvestOrder};
use crate::error::SdkError;
use crate::shared::FundId;

pub struct Orders<'a> {
    pub(crate) client: &'a SharesiesClient,
}

impl<'a> Orders<'a> {
    /// Place an immediate buy of `amount` (in the fund's currency).
    pub async fn buy(&self, fund_id: &FundId, amount: Decimal) -> Result<bool, SdkError> {
        self.client.auth().refresh().await?;
        let auth = self.client.authorize(AuthScope::Primary).await?;

        let body = BuyRequest {
            action: "place",
            amount,
            fund_id,
            expected_fee: expected_buy_fee(amount)?,
            acting_as_id: auth.acting_as_id()?,
        };
        let url = format!("{}/api/cart/immediate-buy-v2", self.client.config.app_url);
        let status = self.client.http.post_for_status(&url, &body, &auth).await?;
        Ok(accepted("buy", status))
    }

    /// Sell `shares` of a fund.
    pub async fn sell(&self, fund_id: &FundId, shares: Decimal) -> Result<bool, SdkError> {
        self.client.auth().refresh().await?;
        let auth = self.client.authorize(AuthScope::Primary).await?;

        let body = SellRequest {
            shares,
            fund_id,
            acting_as_id: auth.acting_as_id()?,
        };
        let url = format!("{}/api/fund/sell", self.client.config.app_url);
        let status = self.client.http.post_for_status(&url, &body, &auth).await?;
        Ok(accepted("sell", status))
    }

    /// Create a DIY auto-invest order.
    pub async fn auto_invest_create(&self, order: &AutoInvestOrder) -> Result<bool, SdkError> {
        self.set_diy_order(order, None).await
    }

    /// Replace an existing auto-invest order.
    pub async fn auto_invest_update(
        &self,
        order_id: &str,
        order: &AutoInvestOrder,
    ) -> Result<bool, SdkError> {
        self.set_diy_order(order, Some(order_id)).await
    }

    /// The user's orders for one fund.
    pub async fn history(&self, fund_id: &FundId) -> Result<Vec<Value>, SdkError> {
        self.client.auth().refresh().await?;
        let auth = self.client.authorize(AuthScope::Primary).await?;

        let url = format!(
            "{}/api/accounting/order-history-v4?fund_id={}&acting_as_id={}",
            self.client.config.app_url,
            urlencoding::encode(fund_id.as_str()),
            urlencoding::encode(auth.acting_as_id()?)
        );
        let resp: OrderHistoryResponse = self.client.http.get(&url, &auth).await?;
        Ok(resp.orders)
    }

    async fn set_diy_order(
        &self,
        order: &AutoInvestOrder,
        order_id: Option<&str>,
    ) -> Result<bool, SdkError> {
        if order.allocations.is_empty() {
            return Err(SdkError::Validation(
                "auto-invest order needs at least one allocation".into(),
            ));
        }

        self.client.auth().refresh().await?;
        let auth = self.client.authorize(AuthScope::Primary).await?;

        let body = SetDiyOrderRequest::new(auth.acting_as_id()?, order, order_id);
        let url = format!("{}/api/autoinvest/set-diy-order", self.client.config.app_url);
        let status = self.client.http.post_for_status(&url, &body, &auth).await?;
        Ok(accepted("auto-invest", status))
    }
}

fn accepted(operation: &str, status: StatusCode) -> bool {
    if !status.is_success() {
        tracing::warn!(operation, status = status.as_u16(), "order submission rejected");
    }
    status.is_success()
}
