//! SQLite export
//!
//! Writes the whole place set in a single transaction, so a failed export
//! leaves no partial rows behind.

use crate::output::traits::{ExportReceipt, ExportResult, Exporter};
use crate::places::PlaceSet;
use chrono::Local;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// SQL schema for the places table
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS places (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    address TEXT NOT NULL,
    rating REAL NOT NULL,
    review_count INTEGER NOT NULL,
    lat REAL NOT NULL,
    lon REAL NOT NULL,
    phone TEXT,
    hours TEXT,
    website TEXT,
    UNIQUE(name, address)
);
"#;

/// Writes the place set to a SQLite database file
pub struct SqliteExporter {
    path: PathBuf,
}

impl SqliteExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Exporter writing to `prospects_<timestamp>.db` under `dir`
    pub fn timestamped(dir: &Path) -> Self {
        let name = format!("prospects_{}.db", Local::now().format("%Y-%m-%d_%H-%M-%S"));
        Self {
            path: dir.join(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Exporter for SqliteExporter {
    fn export(&self, places: &PlaceSet) -> ExportResult<ExportReceipt> {
        let mut conn = Connection::open(&self.path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;
        conn.execute_batch(SCHEMA_SQL)?;

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO places (name, address, rating, review_count, lat, lon, phone, hours, website)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;

            for place in places.iter() {
                stmt.execute(params![
                    place.name,
                    place.address,
                    place.rating,
                    place.review_count,
                    place.coordinates.lat,
                    place.coordinates.lon,
                    place.phone,
                    place.hours,
                    place.website,
                ])?;
            }
        }
        tx.commit()?;

        Ok(ExportReceipt {
            path: self.path.clone(),
            places_written: places.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::places::Place;
    use tempfile::tempdir;

    fn create_test_place(name: &str, phone: Option<&str>) -> Place {
        Place {
            name: name.to_string(),
            address: "123 Main St".to_string(),
            rating: 4.5,
            review_count: 12,
            coordinates: GeoPoint::new(44.97, -93.26),
            hours: None,
            phone: phone.map(|p| p.to_string()),
            website: None,
        }
    }

    #[test]
    fn test_export_round_trip() {
        let dir = tempdir().unwrap();
        let exporter = SqliteExporter::new(dir.path().join("out.db"));

        let mut places = PlaceSet::new();
        places.insert(create_test_place("Cafe A", Some("(612) 555-0188")));
        places.insert(create_test_place("Cafe B", None));

        let receipt = exporter.export(&places).unwrap();
        assert_eq!(receipt.places_written, 2);

        let conn = Connection::open(receipt.path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM places", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let phone: Option<String> = conn
            .query_row(
                "SELECT phone FROM places WHERE name = 'Cafe B'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(phone.is_none());
    }
}
