use std::path::Path;
use anyhow::Context;
use async_trait::async_trait;
use tracing::info;
use crate::models::restaurant::Restaurant;
use crate::repositories::directory::{
    DirectoryQuery, DirectoryResult, Predicate, RestaurantDirectory,
};
use crate::repositories::matching;

/// Directory over a fixed list of restaurants, loaded once at start-up.
pub struct InMemoryRestaurantRepo {
    restaurants: Vec<Restaurant>,
}

impl InMemoryRestaurantRepo {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read restaurants file {}", path.display()))?;
        let restaurants: Vec<Restaurant> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse restaurants file {}", path.display()))?;

        info!("Loaded {} restaurants from {}", restaurants.len(), path.display());
        Ok(Self::new(restaurants))
    }

    fn find(&self, predicate: Predicate, query: &DirectoryQuery) -> Vec<Restaurant> {
        let serviceable = self.restaurants
            .iter()
            .filter(|restaurant| matching::is_serviceable(restaurant, query))
            .cloned()
            .collect();
        matching::apply(predicate, serviceable, &query.search_for)
    }
}

#[async_trait]
impl RestaurantDirectory for InMemoryRestaurantRepo {
    async fn find_nearby(&self, query: &DirectoryQuery) -> DirectoryResult {
        Ok(self.find(Predicate::Nearby, query))
    }

    async fn find_by_name(&self, query: &DirectoryQuery) -> DirectoryResult {
        Ok(self.find(Predicate::Name, query))
    }

    async fn find_by_item_name(&self, query: &DirectoryQuery) -> DirectoryResult {
        Ok(self.find(Predicate::ItemName, query))
    }

    async fn find_by_attributes(&self, query: &DirectoryQuery) -> DirectoryResult {
        Ok(self.find(Predicate::Attributes, query))
    }

    async fn find_by_item_attributes(&self, query: &DirectoryQuery) -> DirectoryResult {
        Ok(self.find(Predicate::ItemAttributes, query))
    }
}
