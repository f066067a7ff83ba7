use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Response,
    Form, Json,
};
use model::{trip::TripPoint, WithId};
use serde::Serialize;
use telemetry::{database::Database, trip::DEFAULT_LIMIT, RequestError};
use utility::serde::fixed_decimal;

use crate::{
    common::{json_response, Parameters, RouteResult, SaveResponse},
    WebState,
};

const MESSAGE_MISSING: &str = "all parameters are required";

/// A trip point as sent to clients: speed and distance with one decimal,
/// coordinates with six.
#[derive(Debug, Clone, Serialize)]
pub struct TripPointDto {
    pub id: i64,
    #[serde(serialize_with = "fixed_decimal::one")]
    pub speed: f64,
    #[serde(serialize_with = "fixed_decimal::one")]
    pub distance: f64,
    #[serde(serialize_with = "fixed_decimal::six")]
    pub latitude: f64,
    #[serde(serialize_with = "fixed_decimal::six")]
    pub longitude: f64,
}

impl From<WithId<TripPoint>> for TripPointDto {
    fn from(point: WithId<TripPoint>) -> Self {
        Self {
            id: point.id.raw(),
            speed: point.content.speed,
            distance: point.content.distance,
            latitude: point.content.latitude,
            longitude: point.content.longitude,
        }
    }
}

/// `GET /api/history-data?limit=..`: the latest trip points, newest first.
/// A missing or non-numeric limit means the default.
pub(crate) async fn get_history<D: Database>(
    State(WebState { trip_service, .. }): State<WebState<D>>,
    query: Option<Query<HashMap<String, String>>>,
) -> RouteResult<Response> {
    let limit = Parameters::merged(query, None)
        .integer("limit")
        .unwrap_or(DEFAULT_LIMIT as i32);

    let points = trip_service.get_latest(limit).await?;
    let dtos = points
        .into_iter()
        .map(TripPointDto::from)
        .collect::<Vec<_>>();
    json_response(&dtos)
}

/// `POST /api/history-data?speed=..&distance=..&latitude=..&longitude=..`
pub(crate) async fn save<D: Database>(
    State(WebState { trip_service, .. }): State<WebState<D>>,
    query: Option<Query<HashMap<String, String>>>,
    form: Option<Form<HashMap<String, String>>>,
) -> RouteResult<Json<SaveResponse>> {
    let [speed, distance, latitude, longitude] = Parameters::merged(query, form).numbers(
        ["speed", "distance", "latitude", "longitude"],
        MESSAGE_MISSING,
    )?;

    match trip_service
        .save_trip(speed, distance, latitude, longitude)
        .await
    {
        Ok(id) => Ok(SaveResponse::saved(id.raw()).json()),
        Err(RequestError::Rejected(_)) => Ok(SaveResponse::rejected().json()),
        Err(why) => Err(why.into()),
    }
}
