//! Wire types for the market data host.

use serde::Deserialize;
use serde_json::Value;

use super::Instrument;
use crate::shared::{FundId, Page};

/// `GET /api/v1/instruments` listing page.
#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentsResponse {
    #[serde(rename = "numberOfPages")]
    pub number_of_pages: u32,
    pub instruments: Vec<Instrument>,
}

impl From<InstrumentsResponse> for Page<Instrument> {
    fn from(resp: InstrumentsResponse) -> Self {
        Page {
            items: resp.instruments,
            number_of_pages: resp.number_of_pages,
        }
    }
}

/// `GET /api/v1/instruments/{id}/pricehistory`.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceHistoryResponse {
    #[serde(rename = "dayPrices")]
    pub day_prices: Value,
}

/// `GET /api/v1/instruments/{id}/dividends`.
#[derive(Debug, Clone, Deserialize)]
pub struct DividendsResponse {
    pub dividends: Value,
}

/// `GET /api/explore/weekly-top-ten-funds` (app host).
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyTopTenResponse {
    pub fund_ids: Vec<FundId>,
}
