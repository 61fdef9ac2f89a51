use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use common::{CompanyInfo, DailyBar, Result, SymbolRecord};

use crate::SeriesStore;

/// SQLite-backed store. One row per symbol; the bar series is persisted as a
/// JSON document in the `bars` column, so the table behaves as a keyed
/// document store rather than a relational bar table.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeriesStore for SqliteStore {
    async fn find_by_symbol(&self, symbol: &str) -> Result<Option<SymbolRecord>> {
        let row = sqlx::query(
            "SELECT symbol, display_name, bars, last_refreshed_at FROM companies WHERE symbol = ?1",
        )
        .bind(symbol)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let bars_json: String = row.try_get("bars")?;
        let bars: Vec<DailyBar> = serde_json::from_str(&bars_json)?;

        let last_refreshed_at: Option<String> = row.try_get("last_refreshed_at")?;
        let last_refreshed_at = last_refreshed_at
            .map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|t| t.with_timezone(&Utc))
                    .map_err(|e| sqlx::Error::ColumnDecode {
                        index: "last_refreshed_at".into(),
                        source: Box::new(e),
                    })
            })
            .transpose()?;

        Ok(Some(SymbolRecord {
            symbol: row.try_get("symbol")?,
            display_name: row.try_get("display_name")?,
            bars,
            last_refreshed_at,
        }))
    }

    async fn upsert(&self, record: &SymbolRecord) -> Result<()> {
        let bars_json = serde_json::to_string(&record.bars)?;
        let last_refreshed_at = record.last_refreshed_at.map(|t| t.to_rfc3339());

        sqlx::query(
            r#"
            INSERT INTO companies (symbol, display_name, bars, last_refreshed_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(symbol) DO UPDATE SET
                display_name      = excluded.display_name,
                bars              = excluded.bars,
                last_refreshed_at = excluded.last_refreshed_at
            "#,
        )
        .bind(&record.symbol)
        .bind(&record.display_name)
        .bind(bars_json)
        .bind(last_refreshed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<CompanyInfo>> {
        let rows = sqlx::query("SELECT display_name, symbol FROM companies ORDER BY symbol")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                Ok(CompanyInfo {
                    display_name: row.try_get("display_name")?,
                    symbol: row.try_get("symbol")?,
                })
            })
            .collect()
    }
}
