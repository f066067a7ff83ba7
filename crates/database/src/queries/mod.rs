use telemetry::database::DatabaseError;

pub mod schema;
pub mod sensor_reading;
pub mod trip_point;

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match why {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        _ => DatabaseError::Other(Box::new(why)),
    }
}

/// Errors raised while opening a connection are always connection errors,
/// whatever sqlx classifies them as.
pub(crate) fn convert_connection_error(why: sqlx::Error) -> DatabaseError {
    DatabaseError::Connection(Box::new(why))
}
