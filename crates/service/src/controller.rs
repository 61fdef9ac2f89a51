use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};

use common::{CompanyInfo, DailyBar, Error, Result, SymbolRecord, Watchlist};
use market::MarketDataFetcher;
use store::SeriesStore;

use crate::result::SeriesResult;

/// Freshness-aware cache controller.
///
/// On each symbol request: load the stored record, decide by age whether to
/// refetch from upstream, replace the series wholesale on success, persist,
/// and hand the resulting closes to the indicator engine. Staleness is
/// non-fatal — a failed refresh serves the cached series; only total absence
/// of data escalates to the caller.
pub struct SeriesService {
    store: Arc<dyn SeriesStore>,
    fetcher: Arc<dyn MarketDataFetcher>,
    watchlist: Arc<Watchlist>,
    /// First date of fetched history.
    history_epoch: NaiveDate,
    /// Cached series older than this many hours trigger a refresh.
    refresh_after_hours: f64,
    /// Per-symbol guards: at most one in-flight refresh per symbol.
    refresh_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SeriesService {
    pub fn new(
        store: Arc<dyn SeriesStore>,
        fetcher: Arc<dyn MarketDataFetcher>,
        watchlist: Arc<Watchlist>,
        history_epoch: NaiveDate,
        refresh_after_hours: f64,
    ) -> Self {
        Self {
            store,
            fetcher,
            watchlist,
            history_epoch,
            refresh_after_hours,
            refresh_locks: Mutex::new(HashMap::new()),
        }
    }

    /// All tracked companies, for the dashboard's symbol picker.
    pub async fn list_companies(&self) -> Result<Vec<CompanyInfo>> {
        self.store.list_all().await
    }

    /// Serve the full series for `symbol`, refreshing the cache if stale.
    pub async fn get_series(&self, symbol: &str) -> Result<SeriesResult> {
        let symbol = symbol.to_uppercase();

        // Scoped per-symbol guard around the load/decide/refresh section;
        // released on every exit path. Requests for other symbols are
        // unaffected.
        let lock = self.symbol_lock(&symbol).await;
        let outcome = {
            let _guard = lock.lock().await;
            self.load_or_refresh(&symbol).await
        };
        self.prune_symbol_lock(&symbol, &lock).await;

        Ok(SeriesResult::compose(outcome?))
    }

    async fn load_or_refresh(&self, symbol: &str) -> Result<SymbolRecord> {
        match self.store.find_by_symbol(symbol).await? {
            None => self.first_load(symbol).await,
            Some(record) => self.maybe_refresh(record).await,
        }
    }

    /// First request for a symbol with no stored record: fetch the full
    /// history and create the record. No upstream data here is fatal.
    async fn first_load(&self, symbol: &str) -> Result<SymbolRecord> {
        let bars = match self.fetcher.fetch_daily(symbol, self.history_epoch).await {
            Ok(bars) => bars,
            Err(e) => {
                warn!(symbol, error = %e, "First-load fetch failed");
                Vec::new()
            }
        };
        if bars.is_empty() {
            return Err(Error::NoDataFound {
                symbol: symbol.to_string(),
            });
        }

        let display_name = self
            .watchlist
            .display_name(symbol)
            .unwrap_or(symbol)
            .to_string();

        let record = SymbolRecord {
            symbol: symbol.to_string(),
            display_name,
            bars: Self::normalize_bars(bars),
            last_refreshed_at: Some(Utc::now()),
        };
        self.store.upsert(&record).await?;
        info!(symbol, bars = record.bars.len(), "Created symbol record");
        Ok(record)
    }

    /// Refresh a stored record when it has aged past the freshness window.
    /// A failed or empty refresh keeps the cached series.
    async fn maybe_refresh(&self, record: SymbolRecord) -> Result<SymbolRecord> {
        let now = Utc::now();
        let stale = match record.age_hours(now) {
            None => true,
            Some(age) => age > self.refresh_after_hours,
        };
        if !stale {
            return Ok(record);
        }

        match self
            .fetcher
            .fetch_daily(&record.symbol, self.history_epoch)
            .await
        {
            Ok(bars) if !bars.is_empty() => {
                // Wholesale replacement: bars and timestamp move together
                let mut record = record;
                record.bars = Self::normalize_bars(bars);
                record.last_refreshed_at = Some(now);
                self.store.upsert(&record).await?;
                info!(
                    symbol = %record.symbol,
                    bars = record.bars.len(),
                    "Refreshed symbol record"
                );
                Ok(record)
            }
            Ok(_) => {
                warn!(symbol = %record.symbol, "Upstream returned no bars; serving cached series");
                Self::require_cached_data(record)
            }
            Err(e) => {
                warn!(symbol = %record.symbol, error = %e, "Refresh fetch failed; serving cached series");
                Self::require_cached_data(record)
            }
        }
    }

    /// A record that was only seeded (no bars, never fetched) has nothing to
    /// serve after a failed refresh — that is `NoDataFound`, not staleness.
    fn require_cached_data(record: SymbolRecord) -> Result<SymbolRecord> {
        if record.bars.is_empty() {
            return Err(Error::NoDataFound {
                symbol: record.symbol,
            });
        }
        Ok(record)
    }

    /// Upstream ordering is not trusted: sort ascending by date and drop
    /// duplicate dates so the stored series holds its invariant by
    /// construction.
    fn normalize_bars(mut bars: Vec<DailyBar>) -> Vec<DailyBar> {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        bars
    }

    async fn symbol_lock(&self, symbol: &str) -> Arc<Mutex<()>> {
        let mut locks = self.refresh_locks.lock().await;
        locks
            .entry(symbol.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the map entry once no request holds the guard any more, so the
    /// lock map tracks in-flight symbols instead of growing with every
    /// symbol ever requested.
    async fn prune_symbol_lock(&self, symbol: &str, lock: &Arc<Mutex<()>>) {
        let mut locks = self.refresh_locks.lock().await;
        if let Some(entry) = locks.get(symbol) {
            // Two handles means the map's and ours — nobody else is waiting
            if Arc::ptr_eq(entry, lock) && Arc::strong_count(entry) == 2 {
                locks.remove(symbol);
            }
        }
    }

    /// Number of live per-symbol guards. Exposed for tests.
    pub async fn refresh_lock_count(&self) -> usize {
        self.refresh_locks.lock().await.len()
    }
}
