use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use anyhow::anyhow;
use async_trait::async_trait;
use time::Time;
use time::macros::time;
use crate::models::restaurant::Restaurant;
use crate::repositories::directory::{
    DirectoryQuery, DirectoryResult, Predicate, RestaurantDirectory,
};

pub const CENTER: (f64, f64) = (28.4900591, 77.536386);

pub fn restaurant(id: &str, name: &str) -> Restaurant {
    Restaurant {
        restaurant_id: id.to_string(),
        name: name.to_string(),
        city: Some("Noida".to_string()),
        image_url: None,
        latitude: CENTER.0,
        longitude: CENTER.1,
        opens_at: time!(6:00),
        closes_at: time!(23:00),
        attributes: vec![],
        menu: vec![],
    }
}

pub fn restaurant_open(id: &str, name: &str, opens_at: Time, closes_at: Time) -> Restaurant {
    Restaurant {
        opens_at,
        closes_at,
        ..restaurant(id, name)
    }
}

pub fn ids(restaurants: &[Restaurant]) -> Vec<&str> {
    restaurants
        .iter()
        .map(|restaurant| restaurant.restaurant_id.as_str())
        .collect()
}

/// Directory double answering each predicate from a script and recording calls.
#[derive(Default)]
pub struct ScriptedDirectory {
    responses: HashMap<Predicate, Vec<Restaurant>>,
    failing: HashSet<Predicate>,
    stalled: HashSet<Predicate>,
    panicking: HashSet<Predicate>,
    calls: Mutex<Vec<(Predicate, DirectoryQuery)>>,
    abandoned: Arc<AtomicUsize>,
}

/// Counts a stalled lookup once its future is dropped.
struct AbandonGuard(Arc<AtomicUsize>);

impl Drop for AbandonGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl ScriptedDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, predicate: Predicate, restaurants: Vec<Restaurant>) -> Self {
        self.responses.insert(predicate, restaurants);
        self
    }

    pub fn fail(mut self, predicate: Predicate) -> Self {
        self.failing.insert(predicate);
        self
    }

    /// The lookup never completes.
    pub fn stall(mut self, predicate: Predicate) -> Self {
        self.stalled.insert(predicate);
        self
    }

    pub fn panic(mut self, predicate: Predicate) -> Self {
        self.panicking.insert(predicate);
        self
    }

    pub fn calls(&self) -> Vec<(Predicate, DirectoryQuery)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called_predicates(&self) -> Vec<Predicate> {
        self.calls().into_iter().map(|(predicate, _)| predicate).collect()
    }

    /// Stalled lookups whose future was dropped before completing.
    pub fn abandoned_lookups(&self) -> usize {
        self.abandoned.load(Ordering::SeqCst)
    }

    async fn respond(&self, predicate: Predicate, query: &DirectoryQuery) -> DirectoryResult {
        self.calls.lock().unwrap().push((predicate, query.clone()));

        if self.panicking.contains(&predicate) {
            panic!("{} lookup blew up", predicate);
        }
        if self.stalled.contains(&predicate) {
            let _guard = AbandonGuard(self.abandoned.clone());
            return futures::future::pending().await;
        }
        if self.failing.contains(&predicate) {
            return Err(anyhow!("{} lookup failed", predicate));
        }

        Ok(self.responses.get(&predicate).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl RestaurantDirectory for ScriptedDirectory {
    async fn find_nearby(&self, query: &DirectoryQuery) -> DirectoryResult {
        self.respond(Predicate::Nearby, query).await
    }

    async fn find_by_name(&self, query: &DirectoryQuery) -> DirectoryResult {
        self.respond(Predicate::Name, query).await
    }

    async fn find_by_item_name(&self, query: &DirectoryQuery) -> DirectoryResult {
        self.respond(Predicate::ItemName, query).await
    }

    async fn find_by_attributes(&self, query: &DirectoryQuery) -> DirectoryResult {
        self.respond(Predicate::Attributes, query).await
    }

    async fn find_by_item_attributes(&self, query: &DirectoryQuery) -> DirectoryResult {
        self.respond(Predicate::ItemAttributes, query).await
    }
}
