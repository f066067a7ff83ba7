use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use telemetry::{database::Database, RequestError};
use utility::serde::plain_decimal;

use crate::{
    common::{Parameters, RouteResult, SaveResponse, TEXT_PLAIN_UTF_8},
    WebState,
};

/// Body sent when there is no reading to report.
pub(crate) const EMPTY_READING: &str = "0.0,0.0";

const MESSAGE_MISSING: &str = "speed and distance are required";

/// `GET /api/sensor-data`: the latest reading as `<speed>,<distance>`.
pub(crate) async fn get_latest<D: Database>(
    State(WebState { sensor_service, .. }): State<WebState<D>>,
) -> Response {
    match sensor_service.get_latest().await {
        Ok(reading) => {
            let body = format!(
                "{},{}",
                plain_decimal(reading.content.speed),
                plain_decimal(reading.content.distance)
            );
            ([(header::CONTENT_TYPE, TEXT_PLAIN_UTF_8)], body).into_response()
        }
        Err(why) => {
            match why {
                RequestError::NotFound => log::warn!("no sensor reading stored yet"),
                other => log::error!("could not read the latest sensor reading: {}", other),
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, TEXT_PLAIN_UTF_8)],
                EMPTY_READING,
            )
                .into_response()
        }
    }
}

/// `POST /api/sensor-data?speed=..&distance=..`
pub(crate) async fn save<D: Database>(
    State(WebState { sensor_service, .. }): State<WebState<D>>,
    query: Option<Query<HashMap<String, String>>>,
    form: Option<Form<HashMap<String, String>>>,
) -> RouteResult<Json<SaveResponse>> {
    let [speed, distance] =
        Parameters::merged(query, form).numbers(["speed", "distance"], MESSAGE_MISSING)?;

    match sensor_service.save_reading(speed, distance).await {
        Ok(id) => Ok(SaveResponse::saved(id.raw()).json()),
        Err(RequestError::Rejected(_)) => Ok(SaveResponse::rejected().json()),
        Err(why) => Err(why.into()),
    }
}
