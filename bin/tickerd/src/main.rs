use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::{Config, Watchlist};
use market::YahooClient;
use service::{seed_catalog, SeriesService};
use store::{SeriesStore, SqliteStore};

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(port = cfg.port, "TickerBoard starting");

    // ── Database ──────────────────────────────────────────────────────────────
    let db = SqlitePool::connect(&cfg.database_url)
        .await
        .unwrap_or_else(|e| panic!("Failed to connect to database: {e}"));
    sqlx::migrate!("../../migrations")
        .run(&db)
        .await
        .unwrap_or_else(|e| panic!("Database migration failed: {e}"));
    info!("Database ready");

    // ── Watchlist + catalog seeding ───────────────────────────────────────────
    let watchlist = match &cfg.watchlist_path {
        Some(path) => Watchlist::load(path),
        None => Watchlist::default(),
    };
    let store: Arc<dyn SeriesStore> = Arc::new(SqliteStore::new(db));
    seed_catalog(store.as_ref(), &watchlist).await;

    // ── Series service ────────────────────────────────────────────────────────
    let fetcher = Arc::new(YahooClient::new(Duration::from_secs(cfg.fetch_timeout_secs)));
    let service = Arc::new(SeriesService::new(
        store,
        fetcher,
        Arc::new(watchlist),
        cfg.history_epoch,
        cfg.refresh_after_hours,
    ));

    // ── Dashboard API ─────────────────────────────────────────────────────────
    api::serve(api::AppState { service }, cfg.port).await;
}
