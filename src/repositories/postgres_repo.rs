use std::collections::HashMap;
use anyhow::{anyhow, Context};
use bb8_postgres::bb8::{Pool, PooledConnection};
use bb8_postgres::PostgresConnectionManager;
use bb8_postgres::tokio_postgres::{NoTls, Row};
use bb8_postgres::tokio_postgres::types::ToSql;
use async_trait::async_trait;
use tracing::{debug, warn};
use crate::models::item::Item;
use crate::models::restaurant::Restaurant;
use crate::repositories::directory::{
    DirectoryQuery, DirectoryResult, Predicate, RestaurantDirectory,
};
use crate::repositories::matching;

pub const RETRY_LIMIT: usize = 5;

const KM_PER_DEGREE_LATITUDE: f64 = 111.0;

const SELECT_OPEN_RESTAURANTS: &str = "SELECT restaurant_id, name, city, image_url, latitude, longitude, \
    opens_at, closes_at, attributes FROM restaurants \
    WHERE latitude BETWEEN $2 AND $3 \
    AND (opens_at = closes_at \
        OR (opens_at < closes_at AND opens_at <= $1 AND $1 < closes_at) \
        OR (opens_at > closes_at AND ($1 >= opens_at OR $1 < closes_at)))";

const SELECT_MENU_ITEMS: &str = "SELECT restaurant_id, item_id, name, price, attributes, image_url \
    FROM menu_items WHERE restaurant_id = ANY($1) ORDER BY item_id";

pub struct PostgresConnectionRepo {
    postgres_connection: Pool<PostgresConnectionManager<NoTls>>,
}

impl PostgresConnectionRepo {
    pub fn new(
        postgres_connection: Pool<PostgresConnectionManager<NoTls>>,
    ) -> Self {
        Self {
            postgres_connection
        }
    }

    async fn get_postgres_connection(
        &self,
    ) -> anyhow::Result<PooledConnection<'_, PostgresConnectionManager<NoTls>>> {
        for _ in 0..RETRY_LIMIT {
            match self.postgres_connection.get().await {
                Ok(conn) => return Ok(conn),
                Err(e) => {
                    warn!("Failed to retrieve postgres connection due to: {}, retrying in 3s", e);
                    tokio::time::sleep(tokio::time::Duration::from_secs(3)).await;
                    continue;
                }
            }
        }

        return Err(anyhow!("Failed to retrieve a valid connection from postgres pool, BAILING"));
    }

    async fn find_restaurants(
        &self,
        predicate: Predicate,
        query: &DirectoryQuery,
    ) -> DirectoryResult {
        let conn = self.get_postgres_connection().await?;
        let stmt = format!("{} {};", SELECT_OPEN_RESTAURANTS, predicate_clause(predicate));

        let lat_span = query.radius_km / KM_PER_DEGREE_LATITUDE;
        let min_lat = query.latitude - lat_span;
        let max_lat = query.latitude + lat_span;
        let pattern = like_pattern(&query.search_for);

        let mut params: Vec<&(dyn ToSql + Sync)> = vec![&query.time, &min_lat, &max_lat];
        if predicate != Predicate::Nearby {
            params.push(&pattern);
        }

        let rows = conn
            .query(&stmt, &params)
            .await
            .with_context(|| format!("Failed to query restaurants by {}", predicate))?;
        drop(conn);

        let mut restaurants = rows
            .into_iter()
            .map(parse_row_into_restaurant)
            .collect::<anyhow::Result<Vec<Restaurant>>>()?;
        restaurants = matching::serviceable(restaurants, query);

        let ids: Vec<String> = restaurants
            .iter()
            .map(|restaurant| restaurant.restaurant_id.clone())
            .collect();
        let mut menus = self.retrieve_menus(&ids).await?;
        for restaurant in restaurants.iter_mut() {
            restaurant.menu = menus.remove(&restaurant.restaurant_id).unwrap_or_default();
        }

        let found = matching::apply(predicate, restaurants, &query.search_for);
        debug!("Found {} restaurants by {}", found.len(), predicate);
        Ok(found)
    }

    async fn retrieve_menus(
        &self,
        restaurant_ids: &Vec<String>,
    ) -> anyhow::Result<HashMap<String, Vec<Item>>> {
        let mut menus: HashMap<String, Vec<Item>> = HashMap::new();
        if restaurant_ids.is_empty() {
            return Ok(menus);
        }

        let conn = self.get_postgres_connection().await?;
        let rows = conn
            .query(SELECT_MENU_ITEMS, &[restaurant_ids])
            .await
            .context("Failed to query menu items")?;

        for row in rows {
            let restaurant_id: String = row.try_get("restaurant_id")?;
            menus
                .entry(restaurant_id)
                .or_default()
                .push(parse_row_into_item(&row)?);
        }

        Ok(menus)
    }
}

#[async_trait]
impl RestaurantDirectory for PostgresConnectionRepo {
    async fn find_nearby(&self, query: &DirectoryQuery) -> DirectoryResult {
        self.find_restaurants(Predicate::Nearby, query).await
    }

    async fn find_by_name(&self, query: &DirectoryQuery) -> DirectoryResult {
        self.find_restaurants(Predicate::Name, query).await
    }

    async fn find_by_item_name(&self, query: &DirectoryQuery) -> DirectoryResult {
        self.find_restaurants(Predicate::ItemName, query).await
    }

    async fn find_by_attributes(&self, query: &DirectoryQuery) -> DirectoryResult {
        self.find_restaurants(Predicate::Attributes, query).await
    }

    async fn find_by_item_attributes(&self, query: &DirectoryQuery) -> DirectoryResult {
        self.find_restaurants(Predicate::ItemAttributes, query).await
    }
}

/// SQL narrowing for each predicate; `$4` is the `ILIKE` pattern.
fn predicate_clause(predicate: Predicate) -> &'static str {
    match predicate {
        Predicate::Nearby => "",
        Predicate::Name => "AND name ILIKE $4",
        Predicate::Attributes => "AND EXISTS (SELECT 1 FROM unnest(attributes) AS attribute \
            WHERE attribute ILIKE $4)",
        Predicate::ItemName => "AND restaurant_id IN (SELECT restaurant_id FROM menu_items \
            WHERE name ILIKE $4)",
        Predicate::ItemAttributes => "AND restaurant_id IN (SELECT restaurant_id FROM menu_items, \
            unnest(menu_items.attributes) AS attribute WHERE attribute ILIKE $4)",
    }
}

fn like_pattern(search_for: &str) -> String {
    let escaped = search_for
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn parse_row_into_restaurant(
    row: Row
) -> anyhow::Result<Restaurant> {
    Ok(Restaurant {
        restaurant_id: row.try_get("restaurant_id")?,
        name: row.try_get("name")?,
        city: row.try_get("city")?,
        image_url: row.try_get("image_url")?,
        latitude: row.try_get::<&str, f64>("latitude")?,
        longitude: row.try_get::<&str, f64>("longitude")?,
        opens_at: row.try_get("opens_at")?,
        closes_at: row.try_get("closes_at")?,
        attributes: row.try_get::<&str, Option<Vec<String>>>("attributes")?.unwrap_or_default(),
        menu: Vec::new(),
    })
}

fn parse_row_into_item(
    row: &Row,
) -> anyhow::Result<Item> {
    Ok(Item {
        item_id: row.try_get("item_id")?,
        name: row.try_get("name")?,
        price: row.try_get::<&str, f64>("price")?,
        attributes: row.try_get::<&str, Option<Vec<String>>>("attributes")?.unwrap_or_default(),
        image_url: row.try_get("image_url")?,
    })
}
