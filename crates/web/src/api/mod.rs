use axum::{
    response::IntoResponse,
    routing::{get, on},
    Json, Router,
};
use serde_json::json;
use telemetry::database::Database;

pub mod history_data;
pub mod sensor_data;

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    WebState,
};

pub fn routes<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route(
            "/sensor-data",
            get(sensor_data::get_latest::<D>).post(sensor_data::save::<D>),
        )
        .route(
            "/history-data",
            get(history_data::get_history::<D>).post(history_data::save::<D>),
        )
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn ping() -> impl IntoResponse {
    Json(json!({
        "message": "pong!"
    }))
}
