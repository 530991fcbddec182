use std::net::SocketAddr;
use anyhow::Context;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use time::{OffsetDateTime, Time, UtcOffset};
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use crate::config::{Config, SearchMode};
use crate::helpers::handler_404::page_not_found_handler;
use crate::services::search_aggregator::SearchAggregator;

pub mod health_check;
pub mod restaurant_controller;

#[derive(Clone)]
pub struct AppState {
    pub search_aggregator: SearchAggregator,
    pub search_mode: SearchMode,
    pub utc_offset: UtcOffset,
}

impl AppState {
    /// Time of day at the service's location; peak hours and opening windows use it.
    pub fn local_time(&self) -> Time {
        OffsetDateTime::now_utc().to_offset(self.utc_offset).time()
    }
}

pub async fn serve(
    app_state: AppState,
    config: &Config,
) -> anyhow::Result<()> {
    let origins: Vec<HeaderValue> = config
        .origin_urls
        .split(',')
        .filter_map(|s| match s.trim().parse() {
            Ok(origin) => Some(origin),
            Err(e) => {
                warn!("Ignoring invalid origin url: {}, due to: {}", s, e);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    let application = router_endpoints(app_state)
        .fallback(page_not_found_handler)
        .layer(
            ServiceBuilder::new()
                .layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests()))
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_methods([
                            Method::GET,
                            Method::OPTIONS
                        ])
                        .allow_origin(origins)
                        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                )
        );

    let port = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("API server listening on port: {}", port);
    axum::Server::bind(&port)
        .serve(application.into_make_service())
        .await
        .context("Error spinning up the API server")
}

pub fn router_endpoints(app_state: AppState) -> Router {
    health_check::router(app_state.clone())
        .merge(restaurant_controller::router(app_state))
}
