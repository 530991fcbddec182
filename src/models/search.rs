use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use crate::models::restaurant::Restaurant;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Incoming search, e.g. `?latitude=28.4900591&longitude=77.536386&searchFor=tamil`.
#[serde_as]
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub search_for: Option<String>,
}

impl SearchRequest {
    pub fn new(latitude: f64, longitude: f64, search_for: Option<&str>) -> Self {
        Self {
            latitude,
            longitude,
            search_for: search_for.map(str::to_string),
        }
    }

    pub fn has_valid_coordinates(&self) -> bool {
        (MIN_LATITUDE..=MAX_LATITUDE).contains(&self.latitude)
            && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude)
    }

    /// The trimmed query text, or `None` when there is nothing to search for.
    pub fn search_text(&self) -> Option<&str> {
        self.search_for
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct SearchResult {
    pub restaurants: Vec<Restaurant>,
}

impl SearchResult {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn restaurant_ids(&self) -> Vec<&str> {
        self.restaurants
            .iter()
            .map(|restaurant| restaurant.restaurant_id.as_str())
            .collect()
    }
}
