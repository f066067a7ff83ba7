use async_trait::async_trait;
use model::{trip::TripPoint, WithId};
use sqlx::prelude::FromRow;
use telemetry::database::{Result, TripPointRepo};
use utility::id::Id;

use crate::{
    queries::trip_point::{get_latest, insert},
    PgDatabaseConnection,
};

use super::DatabaseRow;

/// Table: `trip_data`
#[derive(Debug, Clone, FromRow)]
pub struct TripPointRow {
    pub id: i64,
    pub speed: f64,
    pub distance: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl DatabaseRow for TripPointRow {
    type Model = TripPoint;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id)
    }

    fn to_model(self) -> Self::Model {
        TripPoint {
            speed: self.speed,
            distance: self.distance,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[async_trait]
impl TripPointRepo for PgDatabaseConnection {
    async fn latest_trip_points(&mut self, limit: i64) -> Result<Vec<WithId<TripPoint>>> {
        get_latest(&mut self.connection, limit).await
    }

    async fn insert_trip_point(&mut self, point: TripPoint) -> Result<Id<TripPoint>> {
        insert(&mut self.connection, point).await
    }
}
