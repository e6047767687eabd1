//! Instruments sub-client — listings, single instruments, price history.

use serde_json::Value;

use crate::auth::{AuthScope, RequestAuth};
use crate::client::SharesiesClient;
use crate::domain::instrument::wire::{
    DividendsResponse, InstrumentsResponse, PriceHistoryResponse, WeeklyTopTenResponse,
};
use crate::domain::instrument::Instrument;
use crate::error::SdkError;
use crate::shared::paging::collect_pages;
use crate::shared::{FundId, Page};

/// Page size used by the companies listing.
const COMPANIES_PER_PAGE: u32 = 500;

/// Length of the weekly top ten list.
const TOP_TEN: usize = 10;

/// Sub-client for instrument operations.
pub struct Instruments<'a> {
    pub(crate) client: &'a SharesiesClient,
}

impl<'a> Instruments<'a> {
    /// Every instrument across all listing pages, each with its price history.
    ///
    /// Pages after the first are fetched concurrently. If any page fails the
    /// whole call fails; no partial listing is returned.
    pub async fn all(&self, managed_funds: bool) -> Result<Vec<Instrument>, SdkError> {
        let client = self.client.clone();
        let options = self.client.config.pages.clone();
        collect_pages(
            move |page| {
                let client = client.clone();
                async move { client.instruments().page(page, managed_funds).await }
            },
            &options,
        )
        .await
    }

    /// One listing page, sorted by market cap, with price history injected
    /// into every instrument.
    ///
    /// Price histories are fetched one after another, in listing order.
    pub async fn page(&self, page: u32, managed_funds: bool) -> Result<Page<Instrument>, SdkError> {
        let auth = self.client.authorize(AuthScope::Primary).await?;

        let mut url = format!(
            "{}/api/v1/instruments?Page={}&Sort=marketCap&PriceChangeTime=1y&Query=",
            self.client.config.data_url, page
        );
        if managed_funds {
            url.push_str("&instrumentTypes=mf");
        }

        let resp: InstrumentsResponse = self.client.http.get(&url, &auth).await?;
        let mut listing: Page<Instrument> = resp.into();
        for instrument in &mut listing.items {
            let id = instrument.fund_id()?;
            let history = self.fetch_price_history(&id, &auth).await?;
            instrument.set_price_history(history);
        }
        Ok(listing)
    }

    /// A single instrument with its price history.
    pub async fn get(&self, fund_id: &FundId) -> Result<Instrument, SdkError> {
        let auth = self.client.authorize(AuthScope::Primary).await?;
        let url = format!(
            "{}/api/v1/instruments/{}",
            self.client.config.data_url,
            urlencoding::encode(fund_id.as_str())
        );
        let mut instrument: Instrument = self.client.http.get(&url, &auth).await?;
        let history = self.fetch_price_history(fund_id, &auth).await?;
        instrument.set_price_history(history);
        Ok(instrument)
    }

    /// Daily prices (`dayPrices`) for an instrument.
    pub async fn price_history(&self, fund_id: &FundId) -> Result<Value, SdkError> {
        let auth = self.client.authorize(AuthScope::Primary).await?;
        self.fetch_price_history(fund_id, &auth).await
    }

    pub async fn dividends(&self, fund_id: &FundId) -> Result<Value, SdkError> {
        let auth = self.client.authorize(AuthScope::Primary).await?;
        let url = format!(
            "{}/api/v1/instruments/{}/dividends",
            self.client.config.data_url,
            urlencoding::encode(fund_id.as_str())
        );
        let resp: DividendsResponse = self.client.http.get(&url, &auth).await?;
        Ok(resp.dividends)
    }

    /// One 500-row listing page, filtered to equities. No price history.
    pub async fn companies(&self, page: u32) -> Result<Vec<Instrument>, SdkError> {
        let auth = self.client.authorize(AuthScope::Primary).await?;
        let url = format!(
            "{}/api/v1/instruments?Page={}&PerPage={}&Sort=marketCap&PriceChangeTime=1y&Query=",
            self.client.config.data_url, page, COMPANIES_PER_PAGE
        );
        let resp: InstrumentsResponse = self.client.http.get(&url, &auth).await?;
        Ok(resp
            .instruments
            .into_iter()
            .filter(Instrument::is_equity)
            .collect())
    }

    /// Basic market info, returned as the raw response body.
    pub async fn info(&self) -> Result<String, SdkError> {
        let auth = self.client.authorize(AuthScope::Primary).await?;
        let url = format!("{}/api/v1/instruments/info", self.client.config.data_url);
        Ok(self.client.http.get_text(&url, &auth).await?)
    }

    /// Fund ids of the weekly top ten. No login required.
    pub async fn weekly_top_ten(&self) -> Result<Vec<FundId>, SdkError> {
        let auth = self.client.authorize(AuthScope::Public).await?;
        let url = format!(
            "{}/api/explore/weekly-top-ten-funds",
            self.client.config.app_url
        );
        let resp: WeeklyTopTenResponse = self.client.http.get(&url, &auth).await?;
        Ok(resp.fund_ids)
    }

    /// The fund id at `index` (0-based) of the weekly top ten.
    ///
    /// The index is checked before any request is made.
    pub async fn weekly_top_ten_at(&self, index: usize) -> Result<FundId, SdkError> {
        if index >= TOP_TEN {
            return Err(SdkError::Validation(format!(
                "index {} out of range, expected 0..{}",
                index, TOP_TEN
            )));
        }
        self.weekly_top_ten()
            .await?
            .into_iter()
            .nth(index)
            .ok_or_else(|| SdkError::Validation(format!("top ten list has no entry {index}")))
    }

    async fn fetch_price_history(
        &self,
        fund_id: &FundId,
        auth: &RequestAuth,
    ) -> Result<Value, SdkError> {
        let url = format!(
            "{}/api/v1/instruments/{}/pricehistory",
            self.client.config.data_url,
            urlencoding::encode(fund_id.as_str())
        );
        let resp: PriceHistoryResponse = self.client.http.get(&url, auth).await?;
        Ok(resp.day_prices)
    }
}
