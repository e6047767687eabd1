//! Account sub-client — profile, wallet balance, transaction history.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::auth::AuthScope;
use crate::client::SharesiesClient;
use crate::domain::account::wire::{IdentityCheck, TransactionHistoryResponse};
use crate::domain::account::{Transaction, TRANSACTION_PAGE_LIMIT};
use crate::error::SdkError;
use crate::shared::Currency;

/// Sub-client for the logged-in user's account.
pub struct Account<'a> {
    pub(crate) client: &'a SharesiesClient,
}

impl<'a> Account<'a> {
    /// The full identity check payload for the logged-in user.
    pub async fn profile(&self) -> Result<Value, SdkError> {
        let auth = self.client.authorize(AuthScope::Primary).await?;
        let url = format!("{}/api/identity/check", self.client.config.app_url);
        Ok(self.client.http.get(&url, &auth).await?)
    }

    /// Wallet balance per currency.
    pub async fn wallet_balance(&self) -> Result<HashMap<Currency, Decimal>, SdkError> {
        let check: IdentityCheck = serde_json::from_value(self.profile().await?)?;
        Ok(check.user.wallet_balances)
    }

    /// Every transaction newer than `since` (`0` for all time), newest first.
    ///
    /// Pages backwards 50 at a time using the last `transaction_id` seen as
    /// the `before` cursor, until the backend reports no more.
    pub async fn transactions(&self, since: u64) -> Result<Vec<Transaction>, SdkError> {
        let auth = self.client.authorize(AuthScope::Primary).await?;
        let acting_as_id = urlencoding::encode(auth.acting_as_id()?).into_owned();

        let mut transactions: Vec<Transaction> = Vec::new();
        let mut before: Option<u64> = None;

        loop {
            let mut url = format!(
                "{}/api/accounting/transaction-history?limit={}&acting_as_id={}&since={}",
                self.client.config.app_url, TRANSACTION_PAGE_LIMIT, acting_as_id, since
            );
            if let Some(cursor) = before {
                url.push_str(&format!("&before={}", cursor));
            }

            let resp: TransactionHistoryResponse = self.client.http.get(&url, &auth).await?;
            let fetched = resp.transactions.len();
            transactions.extend(resp.transactions);

            // An empty page cannot advance the cursor.
            if !resp.has_more || fetched == 0 {
                break;
            }
            before = transactions.last().map(|t| t.transaction_id);
        }

        Ok(transactions)
    }
}
