use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// One extracted business result with its attributes
///
/// Immutable after creation. Fields a result card may simply not carry are
/// explicit `Option`s, never empty-string-as-absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub rating: f64,
    #[serde(rename = "reviews")]
    pub review_count: u32,
    #[serde(rename = "location")]
    pub coordinates: GeoPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Place {
    /// Deduplication key: two places with the same name and address are the
    /// same business regardless of which sub-search surfaced them.
    pub fn dedup_key(&self) -> (String, String) {
        (self.name.clone(), self.address.clone())
    }
}
