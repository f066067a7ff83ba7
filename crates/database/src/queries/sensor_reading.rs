use model::{sensor::SensorReading, WithId};
use sqlx::{Executor, Postgres};
use telemetry::database::Result;
use utility::id::Id;

use crate::data_model::{sensor_reading::SensorReadingRow, with_id};

use super::convert_error;

pub async fn get_latest<'c, E>(executor: E) -> Result<WithId<SensorReading>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT id, speed, distance
        FROM sensor_data
        ORDER BY id DESC
        LIMIT 1;
        ",
    )
    .fetch_one(executor)
    .await
    .map(|row: SensorReadingRow| with_id(row))
    .map_err(convert_error)
}

pub async fn insert<'c, E>(executor: E, reading: SensorReading) -> Result<Id<SensorReading>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar(
        "
        INSERT INTO sensor_data(speed, distance)
        VALUES ($1, $2)
        RETURNING id;
        ",
    )
    .bind(reading.speed)
    .bind(reading.distance)
    .fetch_one(executor)
    .await
    .map(|id: i64| Id::new(id))
    .map_err(convert_error)
}
