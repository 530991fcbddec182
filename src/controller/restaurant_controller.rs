use axum::{Extension, Json, Router};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use tracing::{info, warn};
use crate::config::SearchMode;
use crate::controller::AppState;
use crate::models::search::SearchRequest;

pub const RESTAURANTS_API: &str = "/qeats/v1/restaurants";

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route(RESTAURANTS_API, get(get_restaurants))
        .route_layer(Extension(app_state))
}

pub async fn get_restaurants(
    Extension(app_state): Extension<AppState>,
    Query(query): Query<SearchRequest>,
) -> impl IntoResponse {
    if !query.has_valid_coordinates() {
        warn!("Rejecting restaurant search with out of range coordinates: {:?}", query);
        return (
            StatusCode::BAD_REQUEST,
            "Latitude must be within [-90, 90] and longitude within [-180, 180]"
        ).into_response();
    }

    info!("getRestaurants called with {:?}", query);
    let time = app_state.local_time();
    let aggregator = &app_state.search_aggregator;
    let search_res = match app_state.search_mode {
        SearchMode::Sequential => aggregator.search(&query, time).await,
        SearchMode::Concurrent => aggregator.search_concurrent(&query, time).await,
    };

    return match search_res {
        Ok(result) => {
            info!("getRestaurants returned {} restaurants", result.restaurants.len());
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => {
            warn!("Something went wrong searching for restaurants due to: {}", e);
            (
                StatusCode::BAD_REQUEST,
                "Failed to search for restaurants, please try again!"
            ).into_response()
        }
    };
}
