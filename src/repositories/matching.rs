use crate::models::restaurant::Restaurant;
use crate::repositories::directory::{DirectoryQuery, Predicate};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points given in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

pub fn is_serviceable(restaurant: &Restaurant, query: &DirectoryQuery) -> bool {
    restaurant.is_open_at(query.time)
        && haversine_km(query.latitude, query.longitude, restaurant.latitude, restaurant.longitude)
            < query.radius_km
}

pub fn serviceable(restaurants: Vec<Restaurant>, query: &DirectoryQuery) -> Vec<Restaurant> {
    restaurants
        .into_iter()
        .filter(|restaurant| is_serviceable(restaurant, query))
        .collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Exact (case-insensitive) name matches ahead of partial ones.
pub fn by_name(restaurants: Vec<Restaurant>, search_for: &str) -> Vec<Restaurant> {
    let (exact, rest): (Vec<Restaurant>, Vec<Restaurant>) = restaurants
        .into_iter()
        .partition(|restaurant| restaurant.name.to_lowercase() == search_for.to_lowercase());

    exact
        .into_iter()
        .chain(
            rest.into_iter()
                .filter(|restaurant| contains_ignore_case(&restaurant.name, search_for)),
        )
        .collect()
}

pub fn by_attributes(restaurants: Vec<Restaurant>, search_for: &str) -> Vec<Restaurant> {
    restaurants
        .into_iter()
        .filter(|restaurant| restaurant
            .attributes
            .iter()
            .any(|attribute| contains_ignore_case(attribute, search_for)))
        .collect()
}

pub fn by_item_name(restaurants: Vec<Restaurant>, search_for: &str) -> Vec<Restaurant> {
    restaurants
        .into_iter()
        .filter(|restaurant| restaurant
            .menu
            .iter()
            .any(|item| contains_ignore_case(&item.name, search_for)))
        .collect()
}

pub fn by_item_attributes(restaurants: Vec<Restaurant>, search_for: &str) -> Vec<Restaurant> {
    restaurants
        .into_iter()
        .filter(|restaurant| restaurant
            .menu
            .iter()
            .flat_map(|item| item.attributes.iter())
            .any(|attribute| contains_ignore_case(attribute, search_for)))
        .collect()
}

/// Narrows already serviceable restaurants down to the ones `predicate` matches.
pub fn apply(
    predicate: Predicate,
    restaurants: Vec<Restaurant>,
    search_for: &str,
) -> Vec<Restaurant> {
    match predicate {
        Predicate::Nearby => restaurants,
        Predicate::Name => by_name(restaurants, search_for),
        Predicate::ItemName => by_item_name(restaurants, search_for),
        Predicate::Attributes => by_attributes(restaurants, search_for),
        Predicate::ItemAttributes => by_item_attributes(restaurants, search_for),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::time;
    use crate::models::item::Item;
    use super::*;

    fn restaurant(id: &str, name: &str, attributes: &[&str], items: Vec<(&str, Vec<&str>)>) -> Restaurant {
        Restaurant {
            restaurant_id: id.to_string(),
            name: name.to_string(),
            city: None,
            image_url: None,
            latitude: 12.9716,
            longitude: 77.5946,
            opens_at: time!(6:00),
            closes_at: time!(23:00),
            attributes: attributes.iter().map(|a| a.to_string()).collect(),
            menu: items
                .into_iter()
                .enumerate()
                .map(|(i, (name, attributes))| Item {
                    item_id: format!("{}-{}", id, i),
                    name: name.to_string(),
                    price: 120.0,
                    attributes: attributes.into_iter().map(str::to_string).collect(),
                    image_url: None,
                })
                .collect(),
        }
    }

    fn ids(restaurants: &[Restaurant]) -> Vec<&str> {
        restaurants.iter().map(|r| r.restaurant_id.as_str()).collect()
    }

    #[test]
    fn haversine_matches_known_distances() {
        assert_eq!(haversine_km(12.9716, 77.5946, 12.9716, 77.5946), 0.0);

        // One degree of latitude is about 111.19 km.
        let one_degree = haversine_km(0.0, 0.0, 1.0, 0.0);
        assert!((one_degree - 111.19).abs() < 0.01, "{}", one_degree);

        let delhi_to_mumbai = haversine_km(28.6139, 77.2090, 19.0760, 72.8777);
        assert!((delhi_to_mumbai - 1148.1).abs() < 1.0, "{}", delhi_to_mumbai);
    }

    #[test]
    fn serviceable_needs_open_and_strictly_inside_radius() {
        let near = restaurant("near", "Near", &[], vec![]);
        let mut far = restaurant("far", "Far", &[], vec![]);
        far.latitude += 0.05;
        let mut closed = restaurant("closed", "Closed", &[], vec![]);
        closed.opens_at = time!(18:00);

        let query = DirectoryQuery::nearby(12.9716, 77.5946, time!(12:00), 5.0);
        let found = serviceable(vec![near, far, closed], &query);

        assert_eq!(ids(&found), vec!["near"]);
    }

    #[test]
    fn exact_names_come_before_partial_ones() {
        let found = by_name(vec![
            restaurant("1", "Tamil Nadu Mess", &[], vec![]),
            restaurant("2", "Pizza Hut", &[], vec![]),
            restaurant("3", "TAMIL", &[], vec![]),
        ], "tamil");

        assert_eq!(ids(&found), vec!["3", "1"]);
    }

    #[test]
    fn attribute_and_item_predicates_ignore_case() {
        let restaurants = vec![
            restaurant("1", "Saravana", &["South Indian", "Tamil"], vec![("Masala Dosa", vec!["spicy"])]),
            restaurant("2", "Domino's", &["Italian"], vec![("Farmhouse Pizza", vec!["Cheesy"])]),
        ];

        assert_eq!(ids(&by_attributes(restaurants.clone(), "tamil")), vec!["1"]);
        assert_eq!(ids(&by_item_name(restaurants.clone(), "PIZZA")), vec!["2"]);
        assert_eq!(ids(&by_item_attributes(restaurants.clone(), "Spicy")), vec!["1"]);
        assert!(by_item_attributes(restaurants, "sweet").is_empty());
    }
}
