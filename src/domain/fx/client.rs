//! FX sub-client — live quotes and currency transfers between wallet balances.

use rust_decimal::Decimal;

use crate::auth::AuthScope;
use crate::client::SharesiesClient;
use crate::domain::fx::wire::{CreateFxOrderRequest, FxRatesResponse};
use crate::domain::fx::{compute_transfer, select_quote, ExchangeQuote, TransferOrder};
use crate::error::SdkError;
use crate::shared::Currency;

/// Sub-client for FX operations.
pub struct Fx<'a> {
    pub(crate) client: &'a SharesiesClient,
}

impl<'a> Fx<'a> {
    /// All live quotes for the logged-in user.
    pub async fn rates(&self) -> Result<Vec<ExchangeQuote>, SdkError> {
        let auth = self.client.authorize(AuthScope::Primary).await?;
        let url = format!(
            "{}/api/fx/get-rate-v2?acting_as_id={}",
            self.client.config.app_url,
            urlencoding::encode(auth.acting_as_id()?)
        );
        let resp: FxRatesResponse = self.client.http.get(&url, &auth).await?;
        Ok(resp.fx_currencies)
    }

    /// The live quote for one currency pair.
    pub async fn quote(&self, source: &Currency, target: &Currency) -> Result<ExchangeQuote, SdkError> {
        let quotes = self.rates().await?;
        Ok(select_quote(&quotes, source, target)?.clone())
    }

    /// Work out a transfer against the live rate without submitting it.
    pub async fn preview(
        &self,
        source: &Currency,
        target: &Currency,
        source_amount: Decimal,
    ) -> Result<TransferOrder, SdkError> {
        let quote = self.quote(source, target).await?;
        Ok(compute_transfer(&quote, source_amount)?)
    }

    /// Exchange `source_amount` of `source` into `target`.
    ///
    /// Re-authenticates first, fetches the live rate, computes fee and target
    /// amount, then submits a sell order. Domain rejections (no rate for the
    /// pair, target below 0.01) happen before anything is submitted.
    pub async fn transfer(
        &self,
        source: &Currency,
        target: &Currency,
        source_amount: Decimal,
    ) -> Result<serde_json::Value, SdkError> {
        self.client.auth().refresh().await?;

        let order = self.preview(source, target, source_amount).await?;
        let auth = self.client.authorize(AuthScope::Primary).await?;
        let body = CreateFxOrderRequest::new(auth.acting_as_id()?, &order);

        tracing::debug!(
            source = %order.source_currency,
            target = %order.target_currency,
            source_amount = %order.source_amount,
            target_amount = %order.target_amount,
            "submitting fx order"
        );

        let url = format!("{}/api/fx/create-order", self.client.config.app_url);
        Ok(self.client.http.post(&url, &body, &auth).await?)
    }
}
