pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use common::{CompanyInfo, Result, SymbolRecord};

/// Abstraction over the persisted per-symbol records.
///
/// `SqliteStore` implements this for production. `MemoryStore` implements it
/// for tests. The cache controller in `crates/service` is the only writer;
/// its discipline is read, decide, write-whole-record — `bars` and
/// `last_refreshed_at` are never updated separately.
#[async_trait]
pub trait SeriesStore: Send + Sync {
    /// Look up one record by its uppercase ticker.
    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<SymbolRecord>>;

    /// Insert or replace the record keyed by `record.symbol`.
    async fn upsert(&self, record: &SymbolRecord) -> Result<()>;

    /// All tracked companies, ordered by symbol.
    async fn list_all(&self) -> Result<Vec<CompanyInfo>>;
}
