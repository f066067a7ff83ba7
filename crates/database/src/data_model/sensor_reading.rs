use async_trait::async_trait;
use model::{sensor::SensorReading, WithId};
use sqlx::prelude::FromRow;
use telemetry::database::{Result, SensorReadingRepo};
use utility::id::Id;

use crate::{
    queries::sensor_reading::{get_latest, insert},
    PgDatabaseConnection,
};

use super::DatabaseRow;

/// Table: `sensor_data`
#[derive(Debug, Clone, FromRow)]
pub struct SensorReadingRow {
    pub id: i64,
    pub speed: f64,
    pub distance: f64,
}

impl DatabaseRow for SensorReadingRow {
    type Model = SensorReading;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id)
    }

    fn to_model(self) -> Self::Model {
        SensorReading {
            speed: self.speed,
            distance: self.distance,
        }
    }
}

#[async_trait]
impl SensorReadingRepo for PgDatabaseConnection {
    async fn latest_sensor_reading(&mut self) -> Result<WithId<SensorReading>> {
        get_latest(&mut self.connection).await
    }

    async fn insert_sensor_reading(
        &mut self,
        reading: SensorReading,
    ) -> Result<Id<SensorReading>> {
        insert(&mut self.connection, reading).await
    }
}
