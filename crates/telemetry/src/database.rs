use std::{error, fmt, result};

use async_trait::async_trait;
use futures::future::BoxFuture;
use model::{sensor::SensorReading, trip::TripPoint, WithId};
use utility::id::Id;

#[derive(Debug)]
pub enum DatabaseError {
    NotFound,
    /// The database could not be reached or refused the connection.
    Connection(Box<dyn error::Error + Send + Sync>),
    Other(Box<dyn error::Error + Send + Sync>),
}

impl error::Error for DatabaseError {}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::NotFound => write!(f, "row not found"),
            DatabaseError::Connection(why) => write!(f, "connection failed: {}", why),
            DatabaseError::Other(why) => write!(f, "{}", why),
        }
    }
}

pub type Result<T> = result::Result<T, DatabaseError>;

#[async_trait]
pub trait SensorReadingRepo: Send {
    /// The reading with the greatest id. `DatabaseError::NotFound` if there is none.
    async fn latest_sensor_reading(&mut self) -> Result<WithId<SensorReading>>;

    async fn insert_sensor_reading(
        &mut self,
        reading: SensorReading,
    ) -> Result<Id<SensorReading>>;
}

#[async_trait]
pub trait TripPointRepo: Send {
    /// Up to `limit` trip points, most recent first.
    async fn latest_trip_points(&mut self, limit: i64) -> Result<Vec<WithId<TripPoint>>>;

    async fn insert_trip_point(&mut self, point: TripPoint) -> Result<Id<TripPoint>>;
}

/// A single open connection. Has to be released once the caller is done with it.
#[async_trait]
pub trait DatabaseConnection: SensorReadingRepo + TripPointRepo + Send + Sized {
    async fn release(self) -> Result<()>;
}

/// trait to implement a telemetry database.
/// every `acquire` hands out a fresh connection, so concurrent requests never
/// share one. cloning the database object is cheap.
#[async_trait]
pub trait Database: Clone + Send + Sync + Sized + 'static {
    type Connection: DatabaseConnection + 'static;

    async fn acquire(&self) -> Result<Self::Connection>;

    /// Runs `action` on a freshly acquired connection and releases the
    /// connection afterwards, whatever the outcome of `action` was.
    async fn scoped<T, F>(&self, action: F) -> Result<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut Self::Connection) -> BoxFuture<'c, Result<T>> + Send,
    {
        let mut connection = self.acquire().await?;
        let result = action(&mut connection).await;
        if let Err(why) = connection.release().await {
            log::warn!("could not release database connection: {}", why);
        }
        result
    }
}
