//! Portfolios sub-client.

use crate::auth::AuthScope;
use crate::client::SharesiesClient;
use crate::error::SdkError;

pub struct Portfolios<'a> {
    pub(crate) client: &'a SharesiesClient,
}

impl<'a> Portfolios<'a> {
    pub async fn get(&self, portfolio_id: &str) -> Result<serde_json::Value, SdkError> {
        let auth = self.client.authorize(AuthScope::Portfolio).await?;
        let url = format!(
            "{}/api/v1/portfolios/{}",
            self.client.config.portfolio_url,
            urlencoding::encode(portfolio_id)
        );
        Ok(self.client.http.get(&url, &auth).await?)
    }
}
