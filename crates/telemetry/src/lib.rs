use std::{error, fmt};

pub mod database;
pub mod sensor;
pub mod trip;
pub mod validation;

#[cfg(any(test, feature = "memory"))]
pub mod memory;

pub use sensor::SensorReadingService;
pub use trip::TripPointService;
pub use validation::ValidationError;

#[derive(Debug)]
pub enum RequestError {
    /// The input violated a value bound and was not stored.
    Rejected(ValidationError),
    NotFound,
    Database(database::DatabaseError),
}

impl error::Error for RequestError {}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Rejected(why) => write!(f, "rejected: {}", why),
            RequestError::NotFound => write!(f, "no data found"),
            RequestError::Database(why) => write!(f, "database error: {}", why),
        }
    }
}

impl From<database::DatabaseError> for RequestError {
    fn from(value: database::DatabaseError) -> Self {
        match value {
            database::DatabaseError::NotFound => Self::NotFound,
            other => Self::Database(other),
        }
    }
}

impl From<ValidationError> for RequestError {
    fn from(value: ValidationError) -> Self {
        Self::Rejected(value)
    }
}

pub type RequestResult<O> = Result<O, RequestError>;
