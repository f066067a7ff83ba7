use sqlx::PgConnection;
use telemetry::database::Result;

use super::convert_error;

const CREATE_SENSOR_DATA: &str = "
    CREATE TABLE IF NOT EXISTS sensor_data (
        id BIGSERIAL PRIMARY KEY,
        speed DOUBLE PRECISION NOT NULL,
        distance DOUBLE PRECISION NOT NULL
    );
";

const CREATE_TRIP_DATA: &str = "
    CREATE TABLE IF NOT EXISTS trip_data (
        id BIGSERIAL PRIMARY KEY,
        speed DOUBLE PRECISION NOT NULL,
        distance DOUBLE PRECISION NOT NULL,
        latitude DOUBLE PRECISION NOT NULL,
        longitude DOUBLE PRECISION NOT NULL
    );
";

/// `BIGSERIAL` sequences start at 1, so a stored row never has id 0.
pub async fn create_tables(connection: &mut PgConnection) -> Result<()> {
    for statement in [CREATE_SENSOR_DATA, CREATE_TRIP_DATA] {
        sqlx::query(statement)
            .execute(&mut *connection)
            .await
            .map_err(convert_error)?;
    }
    Ok(())
}
