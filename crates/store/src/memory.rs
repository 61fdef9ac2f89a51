use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{CompanyInfo, Error, Result, SymbolRecord};

use crate::SeriesStore;

/// In-memory store for tests. Keeps records in a `BTreeMap` so `list_all`
/// comes back ordered by symbol like the SQLite implementation.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, SymbolRecord>>,
    /// When set, every operation fails with `StoreUnavailable`.
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail, simulating a persistence outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::StoreUnavailable(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl SeriesStore for MemoryStore {
    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<SymbolRecord>> {
        self.check_available()?;
        Ok(self.records.read().await.get(symbol).cloned())
    }

    async fn upsert(&self, record: &SymbolRecord) -> Result<()> {
        self.check_available()?;
        self.records
            .write()
            .await
            .insert(record.symbol.clone(), record.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<CompanyInfo>> {
        self.check_available()?;
        Ok(self
            .records
            .read()
            .await
            .values()
            .map(|r| CompanyInfo {
                display_name: r.display_name.clone(),
                symbol: r.symbol.clone(),
            })
            .collect())
    }
}
