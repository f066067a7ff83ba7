use model::{trip::TripPoint, WithId};
use utility::id::Id;

use crate::{
    database::{Database, TripPointRepo},
    validation, RequestResult,
};

/// Used when fewer than one trip point is requested.
pub const DEFAULT_LIMIT: i64 = 10;

pub const MAX_LIMIT: i64 = 100;

/// Maps a requested history length onto `1..=MAX_LIMIT`.
pub fn effective_limit(requested: i32) -> i64 {
    let requested = i64::from(requested);
    if requested < 1 {
        DEFAULT_LIMIT
    } else {
        requested.min(MAX_LIMIT)
    }
}

#[derive(Clone)]
pub struct TripPointService<D>
where
    D: Database,
{
    database: D,
}

impl<D> TripPointService<D>
where
    D: Database,
{
    pub fn new(database: D) -> Self {
        Self { database }
    }

    /// The most recent trip points, newest first. The limit is clamped, see
    /// [`effective_limit`].
    pub async fn get_latest(&self, limit: i32) -> RequestResult<Vec<WithId<TripPoint>>> {
        let limit = effective_limit(limit);
        let points = self
            .database
            .scoped(move |connection| {
                Box::pin(async move { connection.latest_trip_points(limit).await })
            })
            .await?;
        log::info!("fetched {} trip points (limit {})", points.len(), limit);
        Ok(points)
    }

    pub async fn save_trip(
        &self,
        speed: f64,
        distance: f64,
        latitude: f64,
        longitude: f64,
    ) -> RequestResult<Id<TripPoint>> {
        let point = TripPoint::new(speed, distance, latitude, longitude);
        if let Err(why) = validation::check_trip_point(&point) {
            log::warn!("rejected trip point: {}", why);
            return Err(why.into());
        }

        let id = self
            .database
            .scoped(move |connection| {
                Box::pin(async move { connection.insert_trip_point(point).await })
            })
            .await?;
        log::info!("saved trip point {}", id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{memory::MemoryDatabase, validation::ValidationError, RequestError};

    async fn service_with_points(count: usize) -> TripPointService<MemoryDatabase> {
        let service = TripPointService::new(MemoryDatabase::new());
        for i in 0..count {
            service
                .save_trip(10.0, i as f64, 36.5, 138.5)
                .await
                .unwrap();
        }
        service
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(effective_limit(0), 10);
        assert_eq!(effective_limit(-7), 10);
        assert_eq!(effective_limit(i32::MIN), 10);
        assert_eq!(effective_limit(1), 1);
        assert_eq!(effective_limit(100), 100);
        assert_eq!(effective_limit(500), 100);
        assert_eq!(effective_limit(i32::MAX), 100);
    }

    #[tokio::test]
    async fn zero_limit_behaves_like_ten() {
        let service = service_with_points(25).await;
        assert_eq!(service.get_latest(0).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn large_limit_is_capped() {
        let service = service_with_points(120).await;
        assert_eq!(service.get_latest(500).await.unwrap().len(), 100);
    }

    #[tokio::test]
    async fn newest_points_come_first() {
        let service = service_with_points(5).await;
        let points = service.get_latest(3).await.unwrap();

        let ids = points.iter().map(|point| point.id.raw()).collect::<Vec<_>>();
        assert_eq!(ids, vec![5, 4, 3]);
    }

    #[tokio::test]
    async fn empty_history_is_empty() {
        let service = service_with_points(0).await;
        assert!(service.get_latest(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn round_trip_keeps_values() {
        let service = service_with_points(0).await;
        let id = service.save_trip(8.5, 150.3, 36.5, 138.5).await.unwrap();

        let points = service.get_latest(1).await.unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].id, id);
        assert_eq!(points[0].content, TripPoint::new(8.5, 150.3, 36.5, 138.5));
    }

    #[tokio::test]
    async fn any_violated_bound_rejects() {
        let database = MemoryDatabase::new();
        let service = TripPointService::new(database.clone());

        let cases = [
            (101.0, 1.0, 0.0, 0.0),
            (1.0, -1.0, 0.0, 0.0),
            (1.0, 1.0, 90.5, 0.0),
            (1.0, 1.0, 0.0, -181.0),
        ];
        for (speed, distance, latitude, longitude) in cases {
            let result = service.save_trip(speed, distance, latitude, longitude).await;
            assert!(matches!(result, Err(RequestError::Rejected(_))));
        }

        assert!(database.trip_points().is_empty());
        assert_eq!(database.connections_opened(), 0);
    }

    #[tokio::test]
    async fn latitude_is_checked_before_longitude() {
        let service = service_with_points(0).await;
        let result = service.save_trip(1.0, 1.0, 95.0, 200.0).await;
        assert!(matches!(
            result,
            Err(RequestError::Rejected(ValidationError::Latitude(_)))
        ));
    }

    #[tokio::test]
    async fn every_request_releases_its_connection() {
        let database = MemoryDatabase::new();
        let service = TripPointService::new(database.clone());
        service.save_trip(1.0, 1.0, 1.0, 1.0).await.unwrap();
        service.get_latest(10).await.unwrap();

        assert_eq!(database.connections_opened(), 2);
        assert_eq!(database.connections_open(), 0);
    }
}
