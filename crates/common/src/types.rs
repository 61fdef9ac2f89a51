use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One trading day's OHLCV record for a symbol.
///
/// Immutable once stored for a given date; a refresh replaces the whole
/// series rather than patching individual bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Calendar date, unique per symbol, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Aggregate record for one tracked symbol, persisted as a single document.
///
/// `bars` is ascending by date with no duplicate dates. `last_refreshed_at`
/// is `None` until the first successful upstream fetch; it changes together
/// with `bars` in a single upsert, never separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Uppercase ticker — the sole identity of the record.
    pub symbol: String,
    pub display_name: String,
    pub bars: Vec<DailyBar>,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

impl SymbolRecord {
    /// An empty record as created by the catalog seeder: no bars, never fetched.
    pub fn seeded(symbol: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            display_name: display_name.into(),
            bars: Vec::new(),
            last_refreshed_at: None,
        }
    }

    /// Hours elapsed since the last successful refresh, or `None` if never fetched.
    pub fn age_hours(&self, now: DateTime<Utc>) -> Option<f64> {
        self.last_refreshed_at
            .map(|t| (now - t).num_seconds() as f64 / 3600.0)
    }
}

/// Listing row exposed by `GET /companies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(rename = "name")]
    pub display_name: String,
    pub symbol: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn age_hours_none_when_never_fetched() {
        let record = SymbolRecord::seeded("MSFT", "Microsoft");
        assert!(record.age_hours(Utc::now()).is_none());
    }

    #[test]
    fn age_hours_measures_elapsed_time() {
        let now = Utc::now();
        let mut record = SymbolRecord::seeded("MSFT", "Microsoft");
        record.last_refreshed_at = Some(now - Duration::hours(30));
        let age = record.age_hours(now).unwrap();
        assert!((age - 30.0).abs() < 0.01, "expected ~30h, got {age}");
    }

    #[test]
    fn daily_bar_date_serializes_as_plain_date() {
        let bar = DailyBar {
            date: NaiveDate::from_ymd_opt(2023, 4, 17).unwrap(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
            volume: 1000,
        };
        let json = serde_json::to_value(&bar).unwrap();
        assert_eq!(json["date"], "2023-04-17");
    }
}
