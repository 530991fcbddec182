use std::collections::{HashMap, HashSet};
use crate::models::restaurant::Restaurant;

/// Restaurants of every source in source order, each `restaurant_id` kept the
/// first time it shows up. Also returns the ids that made it in.
pub fn merge_first_seen<I>(sources: I) -> (Vec<Restaurant>, HashSet<String>)
where
    I: IntoIterator<Item = Vec<Restaurant>>,
{
    let mut seen = HashSet::new();
    let merged = sources
        .into_iter()
        .flatten()
        .filter(|restaurant| seen.insert(restaurant.restaurant_id.clone()))
        .collect();

    (merged, seen)
}

/// Keyed union of the sources. A repeated id replaces the stored restaurant
/// but keeps the slot it was first given, so ordering stays deterministic.
pub fn union_by_identity<I>(sources: I) -> Vec<Restaurant>
where
    I: IntoIterator<Item = Vec<Restaurant>>,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<Restaurant> = Vec::new();

    for restaurant in sources.into_iter().flatten() {
        match slots.get(&restaurant.restaurant_id) {
            Some(&slot) => merged[slot] = restaurant,
            None => {
                slots.insert(restaurant.restaurant_id.clone(), merged.len());
                merged.push(restaurant);
            }
        }
    }

    merged
}
