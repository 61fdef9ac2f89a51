use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use common::{DailyBar, Error, Result};

use crate::MarketDataFetcher;

const BASE_URL: &str = "https://query2.finance.yahoo.com";

/// HTTP client for the Yahoo Finance v8 chart API.
///
/// Yahoo has no official API; the endpoint serves daily OHLCV candles as
/// parallel null-padded arrays. Rows for non-trading days come back as nulls
/// and are skipped during parsing.
pub struct YahooClient {
    http: Client,
}

impl YahooClient {
    /// `timeout` bounds the whole request; an elapsed timeout surfaces as a
    /// plain `UpstreamFetch` error.
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: Client::builder()
                .timeout(timeout)
                .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    fn chart_url(symbol: &str, start: NaiveDate) -> String {
        let period1 = start
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always valid")
            .and_utc()
            .timestamp();
        let period2 = chrono::Utc::now().timestamp();
        format!("{BASE_URL}/v8/finance/chart/{symbol}?period1={period1}&period2={period2}&interval=1d")
    }

    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<DailyBar>> {
        let result = match resp.chart.result {
            Some(result) => result,
            None => {
                // "Not Found" from Yahoo means no such symbol — an empty
                // series, not a transport failure.
                if resp.chart.error.as_ref().is_some_and(|e| e.code == "Not Found") {
                    return Ok(Vec::new());
                }
                let detail = resp
                    .chart
                    .error
                    .map(|e| format!("{}: {}", e.code, e.description))
                    .unwrap_or_else(|| "empty result with no error".to_string());
                return Err(Error::UpstreamFetch(detail));
            }
        };

        let Some(data) = result.into_iter().next() else {
            return Ok(Vec::new());
        };
        let timestamps = data.timestamp.unwrap_or_default();
        let Some(quote) = data.indicators.quote.into_iter().next() else {
            return Ok(Vec::new());
        };

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| Error::UpstreamFetch(format!("invalid timestamp: {ts}")))?;

            let open = quote.open.get(i).copied().flatten();
            let high = quote.high.get(i).copied().flatten();
            let low = quote.low.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            let volume = quote.volume.get(i).copied().flatten();

            // Null rows are holidays / non-trading days
            let (Some(open), Some(high), Some(low), Some(close)) = (open, high, low, close) else {
                continue;
            };

            bars.push(DailyBar {
                date,
                open,
                high,
                low,
                close,
                volume: volume.unwrap_or(0),
            });
        }

        debug!(symbol, bars = bars.len(), "Parsed Yahoo chart response");
        Ok(bars)
    }
}

#[async_trait]
impl MarketDataFetcher for YahooClient {
    async fn fetch_daily(&self, symbol: &str, start: NaiveDate) -> Result<Vec<DailyBar>> {
        let url = Self::chart_url(symbol, start);
        debug!(symbol, %start, "Fetching daily history");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::UpstreamFetch(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::UpstreamFetch(format!("HTTP {status}: {body}")));
        }

        let chart: ChartResponse = resp
            .json()
            .await
            .map_err(|e| Error::UpstreamFetch(e.to_string()))?;

        Self::parse_response(symbol, chart)
    }
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Deserialize)]
struct Chart {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<DailyBar>> {
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        YahooClient::parse_response("MSFT", resp)
    }

    #[test]
    fn parses_two_bars() {
        // 2020-01-02 and 2020-01-03, UTC midnight timestamps
        let json = r#"{"chart":{"result":[{"timestamp":[1577923200,1578009600],
            "indicators":{"quote":[{"open":[158.78,158.32],"high":[160.73,159.95],
            "low":[158.33,158.06],"close":[160.62,158.62],"volume":[22622100,21116200]}]}}],
            "error":null}}"#;
        let bars = parse(json).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date.to_string(), "2020-01-02");
        assert_eq!(bars[1].volume, 21116200);
        assert!(bars[0].date < bars[1].date);
    }

    #[test]
    fn skips_null_rows() {
        let json = r#"{"chart":{"result":[{"timestamp":[1577923200,1578009600],
            "indicators":{"quote":[{"open":[158.78,null],"high":[160.73,null],
            "low":[158.33,null],"close":[160.62,null],"volume":[22622100,null]}]}}],
            "error":null}}"#;
        let bars = parse(json).unwrap();
        assert_eq!(bars.len(), 1);
    }

    #[test]
    fn unknown_symbol_yields_empty_series() {
        let json = r#"{"chart":{"result":null,
            "error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let bars = parse(json).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn other_api_error_is_a_fetch_failure() {
        let json = r#"{"chart":{"result":null,
            "error":{"code":"Internal Server Error","description":"boom"}}}"#;
        assert!(parse(json).is_err());
    }
}
