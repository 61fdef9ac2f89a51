pub mod yahoo;

pub use yahoo::YahooClient;

use async_trait::async_trait;
use chrono::NaiveDate;

use common::{DailyBar, Result};

/// Abstraction over the upstream market-data provider.
///
/// `YahooClient` implements this for production; tests substitute scripted
/// fetchers. Implementations return bars ascending by date with no duplicate
/// dates, or an `UpstreamFetch` error. A timeout is treated as a fetch
/// failure by callers, never as a distinct condition.
#[async_trait]
pub trait MarketDataFetcher: Send + Sync {
    /// Fetch the full daily history for `symbol` starting at `start`.
    async fn fetch_daily(&self, symbol: &str, start: NaiveDate) -> Result<Vec<DailyBar>>;
}
