use model::{sensor::SensorReading, WithId};
use utility::id::Id;

use crate::{
    database::{Database, SensorReadingRepo},
    validation, RequestResult,
};

#[derive(Clone)]
pub struct SensorReadingService<D>
where
    D: Database,
{
    database: D,
}

impl<D> SensorReadingService<D>
where
    D: Database,
{
    pub fn new(database: D) -> Self {
        Self { database }
    }

    /// The most recently stored reading. `RequestError::NotFound` while nothing
    /// was stored yet.
    pub async fn get_latest(&self) -> RequestResult<WithId<SensorReading>> {
        let reading = self
            .database
            .scoped(|connection| {
                Box::pin(async move { connection.latest_sensor_reading().await })
            })
            .await?;
        log::info!("latest sensor reading: {:?}", reading);
        Ok(reading)
    }

    /// Validates and stores a reading. Nothing is written, and no connection is
    /// opened, if a value is out of range.
    pub async fn save_reading(
        &self,
        speed: f64,
        distance: f64,
    ) -> RequestResult<Id<SensorReading>> {
        let reading = SensorReading::new(speed, distance);
        if let Err(why) = validation::check_sensor_reading(&reading) {
            log::warn!("rejected sensor reading: {}", why);
            return Err(why.into());
        }

        let id = self
            .database
            .scoped(move |connection| {
                Box::pin(async move { connection.insert_sensor_reading(reading).await })
            })
            .await?;
        log::info!("saved sensor reading {}", id);
        Ok(id)
    }
}
