use model::{trip::TripPoint, WithId};
use sqlx::{Executor, Postgres};
use telemetry::database::Result;
use utility::id::Id;

use crate::data_model::{trip_point::TripPointRow, with_ids};

use super::convert_error;

pub async fn get_latest<'c, E>(executor: E, limit: i64) -> Result<Vec<WithId<TripPoint>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT id, speed, distance, latitude, longitude
        FROM trip_data
        ORDER BY id DESC
        LIMIT $1;
        ",
    )
    .bind(limit)
    .fetch_all(executor)
    .await
    .map(|rows: Vec<TripPointRow>| with_ids(rows))
    .map_err(convert_error)
}

pub async fn insert<'c, E>(executor: E, point: TripPoint) -> Result<Id<TripPoint>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar(
        "
        INSERT INTO trip_data(speed, distance, latitude, longitude)
        VALUES ($1, $2, $3, $4)
        RETURNING id;
        ",
    )
    .bind(point.speed)
    .bind(point.distance)
    .bind(point.latitude)
    .bind(point.longitude)
    .fetch_one(executor)
    .await
    .map(|id: i64| Id::new(id))
    .map_err(convert_error)
}
