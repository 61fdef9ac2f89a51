use chrono::NaiveDate;

/// All configuration loaded from environment variables at startup.
/// Missing required variables cause an immediate panic with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // HTTP server
    pub port: u16,

    // Freshness policy: cached series older than this are refetched.
    pub refresh_after_hours: f64,

    // Upstream fetch
    pub fetch_timeout_secs: u64,
    /// First date of history requested from the upstream provider.
    pub history_epoch: NaiveDate,

    // Optional TOML file overriding the built-in company watchlist.
    pub watchlist_path: Option<String>,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any missing required variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let history_epoch = optional_env("HISTORY_EPOCH")
            .map(|v| {
                NaiveDate::parse_from_str(&v, "%Y-%m-%d").unwrap_or_else(|_| {
                    panic!("HISTORY_EPOCH must be a YYYY-MM-DD date, got: '{v}'")
                })
            })
            .unwrap_or_else(default_epoch);

        Config {
            database_url: required_env("DATABASE_URL"),
            port: optional_env("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            refresh_after_hours: optional_env("REFRESH_AFTER_HOURS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(24.0),
            fetch_timeout_secs: optional_env("FETCH_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            history_epoch,
            watchlist_path: optional_env("WATCHLIST_PATH"),
        }
    }
}

/// 2020-01-01 — the start of all fetched history.
pub fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid constant date")
}

fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        panic!("Required environment variable '{key}' is not set. Check your .env file.")
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
