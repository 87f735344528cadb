//! Store selection from command-line options.

use crate::StoreOptions;
use reb_db::{Database, RestConfig, RestStore};
use reb_stats::dashboard::Dashboard;
use reb_stats::date_catalog::DateCatalog;
use reb_stats::store::StatsStore;
use std::sync::Arc;
use std::time::Duration;

/// Open the store `options` points at. Blocking.
pub fn open_store(options: &StoreOptions) -> anyhow::Result<Arc<dyn StatsStore>> {
    match &options.store_url {
        Some(url) => {
            let mut config = RestConfig::new(url.as_str());
            if let Some(key) = &options.store_key {
                config = config.with_api_key(key.as_str());
            }
            Ok(Arc::new(RestStore::new(config)?))
        }
        None => {
            log::info!("store: loading fixtures from {}", options.fixtures.display());
            Ok(Arc::new(Database::open_dir(&options.fixtures)?))
        }
    }
}

/// A dashboard over the configured store, optionally capping the catalog
/// at `limit` dates.
pub fn build_dashboard(options: &StoreOptions, limit: Option<usize>) -> anyhow::Result<Dashboard> {
    let store = open_store(options)?;
    let mut catalog = DateCatalog::new(store.clone())
        .with_cache_ttl(Duration::from_secs(options.cache_ttl_secs));
    if let Some(limit) = limit {
        catalog = catalog.with_limit(limit);
    }
    Ok(Dashboard::with_catalog(store, catalog))
}
