use tracing::{info, warn};

use common::{SymbolRecord, Watchlist};
use store::SeriesStore;

/// Ensure every watchlist company has a stored record.
///
/// Idempotent: symbols already present are left untouched; missing ones are
/// created with empty bars and no refresh timestamp. Runs once at startup.
/// Per-symbol failures are logged and skipped — seeding never aborts startup.
pub async fn seed_catalog(store: &dyn SeriesStore, watchlist: &Watchlist) {
    let mut created = 0usize;
    for company in &watchlist.companies {
        match store.find_by_symbol(&company.symbol).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                let record = SymbolRecord::seeded(&company.symbol, &company.display_name);
                match store.upsert(&record).await {
                    Ok(()) => created += 1,
                    Err(e) => warn!(symbol = %company.symbol, error = %e, "Failed to seed company"),
                }
            }
            Err(e) => warn!(symbol = %company.symbol, error = %e, "Seed lookup failed"),
        }
    }
    info!(
        companies = watchlist.companies.len(),
        created, "Catalog seeded"
    );
}
