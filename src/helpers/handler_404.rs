use axum::http::StatusCode;
use axum::response::IntoResponse;
use crate::controller::restaurant_controller::RESTAURANTS_API;

pub async fn page_not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        format!("Nothing to eat here, restaurants are served from {}", RESTAURANTS_API),
    )
}
