//! CSV data loading functions for populating the in-memory SQLite database.
//!
//! # CSV Formats
//!
//! - **Regions** (has headers): `REGION_ID,DISPLAY_NAME,VIEW_GROUP,VIEW_ORDER,NATIONAL,CAPITAL`
//! - **Weekly stats** (has headers): `REGION_ID,DATE,SALE_CHANGE,JEONSE_CHANGE`
//!
//! Either file may be gzipped; see [`Database::load_dir`].

use crate::Database;
use anyhow::Context;
use flate2::read::GzDecoder;
use reb_stats::dates;
use rusqlite::params;
use std::io::Read;
use std::path::Path;

/// Fixture file stem for region metadata.
pub const REGIONS_FILE: &str = "regions.csv";
/// Fixture file stem for weekly statistics.
pub const WEEKLY_STATS_FILE: &str = "weekly_stats.csv";

/// Interpret a boolean-like CSV cell. Anything unrecognised is false.
fn parse_flag(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "y" | "yes"
    )
}

/// Inflate a gzipped CSV into a string.
fn gunzip(bytes: &[u8]) -> anyhow::Result<String> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = String::new();
    decoder.read_to_string(&mut out)?;
    Ok(out)
}

/// Read `dir/name`, or `dir/name.gz` when only the compressed file exists.
fn read_fixture(dir: &Path, name: &str) -> anyhow::Result<String> {
    let plain = dir.join(name);
    if plain.exists() {
        return std::fs::read_to_string(&plain)
            .with_context(|| format!("reading {}", plain.display()));
    }
    let gz = dir.join(format!("{}.gz", name));
    let bytes = std::fs::read(&gz).with_context(|| format!("reading {}", gz.display()))?;
    gunzip(&bytes).with_context(|| format!("decompressing {}", gz.display()))
}

impl Database {
    /// Load region metadata from CSV string.
    ///
    /// Expected format (with headers):
    /// `REGION_ID,DISPLAY_NAME,VIEW_GROUP,VIEW_ORDER,NATIONAL,CAPITAL`
    ///
    /// Flags accept `1`/`0`, `true`/`false` or `Y`/`N`; blanks are false.
    ///
    /// # Example CSV
    /// ```text
    /// REGION_ID,DISPLAY_NAME,VIEW_GROUP,VIEW_ORDER,NATIONAL,CAPITAL
    /// KR,전국,전국,0,1,0
    /// 11680,강남구,서울,101,0,1
    /// ```
    pub fn load_regions(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            let region_id = r.get(0).unwrap_or("").trim();
            let display_name = r.get(1).unwrap_or("").trim();
            let view_group = r.get(2).unwrap_or("").trim();
            let view_order: i64 = r
                .get(3)
                .unwrap_or("0")
                .trim()
                .parse()
                .with_context(|| format!("view order for region {}", region_id))?;
            let national = parse_flag(r.get(4).unwrap_or(""));
            let capital = parse_flag(r.get(5).unwrap_or(""));

            conn.execute(
                "INSERT OR REPLACE INTO regions
                 (region_id, display_name, view_group_name, view_order, is_national, is_capital)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![region_id, display_name, view_group, view_order, national, capital],
            )?;
            count += 1;
        }
        log::info!("loader: loaded {} regions", count);
        Ok(())
    }

    /// Load weekly statistics from CSV string.
    ///
    /// Expected format (with headers): `REGION_ID,DATE,SALE_CHANGE,JEONSE_CHANGE`
    ///
    /// Dates may be `YYYY-MM-DD` or `YYYYMMDD` and are stored as
    /// `YYYY-MM-DD`. Rows with an unparseable date or non-numeric change are
    /// skipped.
    ///
    /// # Example CSV
    /// ```text
    /// REGION_ID,DATE,SALE_CHANGE,JEONSE_CHANGE
    /// KR,2025-12-08,0.03,0.05
    /// 11680,20251208,0.21,0.11
    /// ```
    pub fn load_weekly_stats(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let region_id = r.get(0).unwrap_or("").trim();
            let date = match dates::parse_date_lenient(r.get(1).unwrap_or("")) {
                Some(d) => dates::format_date(&d),
                None => { skipped += 1; continue; }
            };
            let sale: f64 = match r.get(2).unwrap_or("").trim().parse() {
                Ok(v) => v,
                Err(_) => { skipped += 1; continue; }
            };
            let jeonse: f64 = match r.get(3).unwrap_or("").trim().parse() {
                Ok(v) => v,
                Err(_) => { skipped += 1; continue; }
            };

            if region_id.is_empty() {
                skipped += 1;
                continue;
            }

            conn.execute(
                "INSERT OR REPLACE INTO weekly_stats (region_id, date, sale_change, jeonse_change)
                 VALUES (?1, ?2, ?3, ?4)",
                params![region_id, date, sale, jeonse],
            )?;
            count += 1;
        }
        log::info!("loader: loaded {} weekly stats, skipped {} invalid", count, skipped);
        Ok(())
    }

    /// Load gzipped region metadata.
    pub fn load_regions_gz(&self, bytes: &[u8]) -> anyhow::Result<()> {
        self.load_regions(&gunzip(bytes)?)
    }

    /// Load gzipped weekly statistics.
    pub fn load_weekly_stats_gz(&self, bytes: &[u8]) -> anyhow::Result<()> {
        self.load_weekly_stats(&gunzip(bytes)?)
    }

    /// Load `regions.csv` and `weekly_stats.csv` (or their `.gz` forms) from
    /// a fixtures directory.
    pub fn load_dir(&self, dir: &Path) -> anyhow::Result<()> {
        self.load_regions(&read_fixture(dir, REGIONS_FILE)?)?;
        self.load_weekly_stats(&read_fixture(dir, WEEKLY_STATS_FILE)?)?;
        Ok(())
    }

    /// A fresh database populated from a fixtures directory.
    pub fn open_dir(dir: &Path) -> anyhow::Result<Self> {
        let db = Self::new()?;
        db.load_dir(dir)?;
        Ok(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const REGIONS_CSV: &str = "\
REGION_ID,DISPLAY_NAME,VIEW_GROUP,VIEW_ORDER,NATIONAL,CAPITAL
KR,전국,전국,0,1,0
11,서울,광역,2,1,1
11680,강남구,서울,101,0,Y
";

    const STATS_CSV: &str = "\
REGION_ID,DATE,SALE_CHANGE,JEONSE_CHANGE
KR,2025-12-08,0.03,0.05
11,20251208,0.12,0.07
11680,2025-12-08,---,0.1
11680,not-a-date,0.2,0.1
,2025-12-08,0.2,0.1
";

    fn gzip(text: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    fn count(db: &Database, table: &str) -> i64 {
        let conn = db.conn().unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn load_regions_from_csv() {
        let db = Database::new().unwrap();
        db.load_regions(REGIONS_CSV).unwrap();
        assert_eq!(count(&db, "regions"), 3);

        let conn = db.conn().unwrap();
        let (group, order, national, capital): (String, i64, i64, i64) = conn
            .query_row(
                "SELECT view_group_name, view_order, is_national, is_capital
                 FROM regions WHERE region_id = '11680'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .unwrap();
        assert_eq!(group, "서울");
        assert_eq!(order, 101);
        assert_eq!(national, 0);
        assert_eq!(capital, 1);
    }

    #[test]
    fn load_regions_replaces_on_conflict() {
        let db = Database::new().unwrap();
        db.load_regions(REGIONS_CSV).unwrap();
        db.load_regions(
            "REGION_ID,DISPLAY_NAME,VIEW_GROUP,VIEW_ORDER,NATIONAL,CAPITAL\n11,서울특별시,광역,2,1,1\n",
        )
        .unwrap();
        assert_eq!(count(&db, "regions"), 3, "Should upsert, not duplicate");

        let conn = db.conn().unwrap();
        let name: String = conn
            .query_row("SELECT display_name FROM regions WHERE region_id = '11'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(name, "서울특별시");
    }

    #[test]
    fn load_regions_rejects_bad_view_order() {
        let db = Database::new().unwrap();
        let result = db.load_regions(
            "REGION_ID,DISPLAY_NAME,VIEW_GROUP,VIEW_ORDER,NATIONAL,CAPITAL\nKR,전국,전국,first,1,0\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn load_weekly_stats_skips_invalid_rows() {
        let db = Database::new().unwrap();
        db.load_weekly_stats(STATS_CSV).unwrap();
        assert_eq!(count(&db, "weekly_stats"), 2);
    }

    #[test]
    fn load_weekly_stats_normalizes_compact_dates() {
        let db = Database::new().unwrap();
        db.load_weekly_stats(STATS_CSV).unwrap();
        let conn = db.conn().unwrap();
        let date: String = conn
            .query_row("SELECT date FROM weekly_stats WHERE region_id = '11'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(date, "2025-12-08");
    }

    #[test]
    fn parse_flag_variants() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("y"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("no"));
    }

    #[test]
    fn load_gzipped_csv() {
        let db = Database::new().unwrap();
        db.load_regions_gz(&gzip(REGIONS_CSV)).unwrap();
        db.load_weekly_stats_gz(&gzip(STATS_CSV)).unwrap();
        assert_eq!(count(&db, "regions"), 3);
        assert_eq!(count(&db, "weekly_stats"), 2);
    }

    #[test]
    fn load_dir_prefers_plain_and_falls_back_to_gz() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(REGIONS_FILE), REGIONS_CSV).unwrap();
        std::fs::write(
            dir.path().join(format!("{}.gz", WEEKLY_STATS_FILE)),
            gzip(STATS_CSV),
        )
        .unwrap();

        let db = Database::open_dir(dir.path()).unwrap();
        assert_eq!(count(&db, "regions"), 3);
        assert_eq!(count(&db, "weekly_stats"), 2);
    }

    #[test]
    fn load_dir_missing_files_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Database::open_dir(dir.path()).is_err());
    }
}
