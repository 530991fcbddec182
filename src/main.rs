use std::sync::Arc;
use std::time::Duration;
use anyhow::{anyhow, Context};
use bb8_postgres::bb8::Pool;
use bb8_postgres::PostgresConnectionManager;
use bb8_postgres::tokio_postgres::NoTls;
use clap::Parser;
use dotenv::dotenv;
use time::UtcOffset;
use tracing::info;
use eat_where_la_search::config::Config;
use eat_where_la_search::controller;
use eat_where_la_search::controller::AppState;
use eat_where_la_search::repositories::directory::RestaurantDirectory;
use eat_where_la_search::repositories::in_memory_repo::InMemoryRestaurantRepo;
use eat_where_la_search::repositories::postgres_repo::PostgresConnectionRepo;
use eat_where_la_search::services::radius_policy::RadiusPolicy;
use eat_where_la_search::services::search_aggregator::SearchAggregator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();
    info!(
        "Starting {} restaurant search with {:?} lookups",
        config.environment, config.search_mode
    );

    let directory = restaurant_directory(&config).await?;
    let search_aggregator = SearchAggregator::new(
        directory,
        RadiusPolicy::new(config.peak_radius_km, config.normal_radius_km),
        Duration::from_millis(config.search_timeout_ms),
    );
    let utc_offset = UtcOffset::from_hms(config.utc_offset_hours, 0, 0)
        .context("Invalid utc offset hours")?;

    let app_state = AppState {
        search_aggregator,
        search_mode: config.search_mode,
        utc_offset,
    };

    controller::serve(app_state, &config).await
}

async fn restaurant_directory(
    config: &Config,
) -> anyhow::Result<Arc<dyn RestaurantDirectory>> {
    if let Some(database_url) = &config.database_url {
        let manager = PostgresConnectionManager::new_from_stringlike(database_url, NoTls)
            .context("Invalid database url")?;
        let postgres_connection = Pool::builder()
            .build(manager)
            .await
            .context("Failed to build postgres connection pool")?;

        info!("Serving restaurants from postgres");
        return Ok(Arc::new(PostgresConnectionRepo::new(postgres_connection)));
    }

    if let Some(restaurants_file) = &config.restaurants_file {
        return Ok(Arc::new(InMemoryRestaurantRepo::from_json_file(restaurants_file)?));
    }

    Err(anyhow!("Either DATABASE_URL or RESTAURANTS_FILE must be set"))
}
