use axum::{Extension, Json, Router};
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::{json, Value};
use crate::controller::AppState;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(get_health_check))
        .route_layer(Extension(app_state))
}

/// Liveness probe, also reports which search variant is being served
async fn get_health_check(
    Extension(app_state): Extension<AppState>,
) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "UP",
            "searchMode": app_state.search_mode,
        })),
    )
}
