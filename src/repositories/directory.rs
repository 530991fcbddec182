use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use time::Time;
use tokio::task::JoinHandle;
use crate::models::restaurant::Restaurant;

pub type DirectoryResult = anyhow::Result<Vec<Restaurant>>;

/// The five lookups a directory answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Predicate {
    Nearby,
    Name,
    ItemName,
    Attributes,
    ItemAttributes,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Predicate::Nearby => "nearby",
            Predicate::Name => "restaurant name",
            Predicate::ItemName => "item name",
            Predicate::Attributes => "restaurant attributes",
            Predicate::ItemAttributes => "item attributes",
        };
        f.write_str(name)
    }
}

/// Center, radius and time shared by every lookup of one search.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectoryQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub search_for: String,
    pub time: Time,
    pub radius_km: f64,
}

impl DirectoryQuery {
    pub fn nearby(latitude: f64, longitude: f64, time: Time, radius_km: f64) -> Self {
        Self {
            latitude,
            longitude,
            search_for: String::new(),
            time,
            radius_km,
        }
    }

    pub fn with_search(mut self, search_for: &str) -> Self {
        self.search_for = search_for.to_string();
        self
    }
}

/// Restaurants open at `query.time` within `query.radius_km` of the center.
/// An empty vec is a valid answer, not an error.
#[async_trait]
pub trait RestaurantDirectory: Send + Sync {
    async fn find_nearby(&self, query: &DirectoryQuery) -> DirectoryResult;

    /// Exact name matches first, then partial ones.
    async fn find_by_name(&self, query: &DirectoryQuery) -> DirectoryResult;

    async fn find_by_item_name(&self, query: &DirectoryQuery) -> DirectoryResult;

    /// Cuisines and other restaurant tags.
    async fn find_by_attributes(&self, query: &DirectoryQuery) -> DirectoryResult;

    async fn find_by_item_attributes(&self, query: &DirectoryQuery) -> DirectoryResult;
}

pub fn spawn_find_by_name(
    directory: Arc<dyn RestaurantDirectory>,
    query: DirectoryQuery,
) -> JoinHandle<DirectoryResult> {
    tokio::spawn(async move { directory.find_by_name(&query).await })
}

pub fn spawn_find_by_attributes(
    directory: Arc<dyn RestaurantDirectory>,
    query: DirectoryQuery,
) -> JoinHandle<DirectoryResult> {
    tokio::spawn(async move { directory.find_by_attributes(&query).await })
}
