//! Store backends for weekly housing statistics.
//!
//! Two implementations of [`reb_stats::store::StatsStore`]:
//!
//! - [`Database`]: an in-memory SQLite database (`rusqlite`) populated from
//!   CSV fixtures, plain or gzipped. Used for local runs, demos and tests.
//! - [`RestStore`]: a hosted PostgREST-style endpoint read over HTTP.
//!
//! # Usage
//!
//! ```rust
//! use reb_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_regions("REGION_ID,DISPLAY_NAME,VIEW_GROUP,VIEW_ORDER,NATIONAL,CAPITAL\nKR,전국,전국,0,1,0\n").unwrap();
//! db.load_weekly_stats("REGION_ID,DATE,SALE_CHANGE,JEONSE_CHANGE\nKR,2025-12-08,0.03,0.05\n").unwrap();
//!
//! let dates = db.query_report_dates("전국", 2000).unwrap();
//! assert_eq!(dates, vec!["2025-12-08".to_string()]);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `regions` - Region metadata: display name, view group, order, flags
//! - `weekly_stats` - Weekly sale and jeonse changes per region

pub mod schema;
mod loader;
mod queries;
pub mod rest;
mod store;

pub use rest::{RestConfig, RestStore};

use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory SQLite database holding regions and weekly statistics.
///
/// Cheaply cloneable; clones share one connection behind a mutex so the
/// handle can be used from request handlers on any thread.
///
/// # Example
///
/// ```rust
/// use reb_db::Database;
///
/// let db = Database::new().unwrap();
/// db.load_regions("REGION_ID,DISPLAY_NAME,VIEW_GROUP,VIEW_ORDER,NATIONAL,CAPITAL\n11,서울,광역,2,1,1\n").unwrap();
/// assert_eq!(db.query_view_groups().unwrap(), vec!["광역".to_string()]);
/// ```
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open a private in-memory connection and apply [`schema::create_schema`].
    /// Tables start out empty; see [`Database::open_dir`] for a loaded one.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database connection lock poisoned"))
    }
}
