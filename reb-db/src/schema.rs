//! SQL schema definitions for the in-memory SQLite database.
//!
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// - `regions` - One row per region: display name, view group, view order,
///   and 0/1 membership flags for the national and capital-area views
/// - `weekly_stats` - One row per (region, report date) with the weekly sale
///   and jeonse changes in percent. Dates are stored as `YYYY-MM-DD` so text
///   ordering matches calendar ordering.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS regions (
        region_id TEXT PRIMARY KEY,
        display_name TEXT NOT NULL,
        view_group_name TEXT NOT NULL,
        view_order INTEGER NOT NULL,
        is_national INTEGER NOT NULL DEFAULT 0,
        is_capital INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_regions_display_name ON regions(display_name);
    CREATE INDEX IF NOT EXISTS idx_regions_group ON regions(view_group_name);

    CREATE TABLE IF NOT EXISTS weekly_stats (
        region_id TEXT NOT NULL,
        date TEXT NOT NULL,
        sale_change REAL NOT NULL,
        jeonse_change REAL NOT NULL,
        PRIMARY KEY (region_id, date)
    );
    CREATE INDEX IF NOT EXISTS idx_stats_region ON weekly_stats(region_id);
    CREATE INDEX IF NOT EXISTS idx_stats_date ON weekly_stats(date);
    "#
}
