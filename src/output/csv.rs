//! CSV export with the fixed prospect column layout
//!
//! Columns, in order: Name, Address, Stars, Reviews, Phone, Hours, Website.
//! Every column is present even when a field is empty for a given place;
//! ratings are written with one decimal place.

use crate::output::traits::{ExportReceipt, ExportResult, Exporter};
use crate::places::PlaceSet;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

const HEADER: [&str; 7] = [
    "Name", "Address", "Stars", "Reviews", "Phone", "Hours", "Website",
];

/// Writes the place set to a CSV file
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Exporter writing to `prospects_<timestamp>.csv` under `dir`
    pub fn timestamped(dir: &Path) -> Self {
        let name = format!("prospects_{}.csv", Local::now().format("%Y-%m-%d_%H-%M-%S"));
        Self {
            path: dir.join(name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Exporter for CsvExporter {
    fn export(&self, places: &PlaceSet) -> ExportResult<ExportReceipt> {
        let mut out = String::new();
        push_row(&mut out, HEADER.iter().map(|h| h.to_string()));

        for place in places.iter() {
            push_row(
                &mut out,
                [
                    place.name.clone(),
                    place.address.clone(),
                    format!("{:.1}", place.rating),
                    place.review_count.to_string(),
                    place.phone.clone().unwrap_or_default(),
                    place.hours.clone().unwrap_or_default(),
                    place.website.clone().unwrap_or_default(),
                ],
            );
        }

        // Land the file in one rename so a failed write never leaves a
        // partial CSV at the destination
        let tmp = self.path.with_extension("csv.tmp");
        fs::write(&tmp, out.as_bytes())?;
        fs::rename(&tmp, &self.path)?;

        Ok(ExportReceipt {
            path: self.path.clone(),
            places_written: places.len(),
        })
    }
}

fn push_row(out: &mut String, fields: impl IntoIterator<Item = String>) {
    let row = fields
        .into_iter()
        .map(|field| escape_field(&field))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&row);
    out.push('\n');
}

/// Quotes a field when it contains a separator, quote, or line break
fn escape_field(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
