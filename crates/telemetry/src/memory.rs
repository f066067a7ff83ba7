//! A process-local database keeping both tables in memory.
//!
//! Behaves like the Postgres backend as far as callers can tell: ids start at 1
//! and grow by insertion order, and every `acquire` hands out a new connection.
//! The database can be switched into a failing mode where acquiring a
//! connection errors, and it counts connections so tests can check that every
//! acquired connection was released again.

use std::{
    io,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use model::{sensor::SensorReading, trip::TripPoint, WithId};
use utility::id::Id;

use crate::database::{
    Database, DatabaseConnection, DatabaseError, Result, SensorReadingRepo,
    TripPointRepo,
};

#[derive(Debug, Default)]
struct State {
    sensor_data: Vec<WithId<SensorReading>>,
    trip_data: Vec<WithId<TripPoint>>,
    last_sensor_id: i64,
    last_trip_id: i64,
    failing: bool,
    connections_opened: usize,
    connections_open: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<Mutex<State>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// While failing, `acquire` returns a connection error.
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Number of connections handed out so far.
    pub fn connections_opened(&self) -> usize {
        self.lock().connections_opened
    }

    /// Number of connections handed out and not yet released or dropped.
    pub fn connections_open(&self) -> usize {
        self.lock().connections_open
    }

    pub fn sensor_readings(&self) -> Vec<WithId<SensorReading>> {
        self.lock().sensor_data.clone()
    }

    pub fn trip_points(&self) -> Vec<WithId<TripPoint>> {
        self.lock().trip_data.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        lock(&self.state)
    }
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct MemoryConnection {
    state: Arc<Mutex<State>>,
    released: bool,
}

impl Drop for MemoryConnection {
    fn drop(&mut self) {
        if !self.released {
            lock(&self.state).connections_open -= 1;
        }
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    type Connection = MemoryConnection;

    async fn acquire(&self) -> Result<Self::Connection> {
        let mut state = self.lock();
        if state.failing {
            return Err(DatabaseError::Connection(Box::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "memory database is switched to failing",
            ))));
        }
        state.connections_opened += 1;
        state.connections_open += 1;
        Ok(MemoryConnection {
            state: self.state.clone(),
            released: false,
        })
    }
}

#[async_trait]
impl DatabaseConnection for MemoryConnection {
    async fn release(mut self) -> Result<()> {
        lock(&self.state).connections_open -= 1;
        self.released = true;
        Ok(())
    }
}

#[async_trait]
impl SensorReadingRepo for MemoryConnection {
    async fn latest_sensor_reading(&mut self) -> Result<WithId<SensorReading>> {
        lock(&self.state)
            .sensor_data
            .last()
            .cloned()
            .ok_or(DatabaseError::NotFound)
    }

    async fn insert_sensor_reading(
        &mut self,
        reading: SensorReading,
    ) -> Result<Id<SensorReading>> {
        let mut state = lock(&self.state);
        state.last_sensor_id += 1;
        let id = Id::new(state.last_sensor_id);
        state.sensor_data.push(WithId::new(id, reading));
        Ok(id)
    }
}

#[async_trait]
impl TripPointRepo for MemoryConnection {
    async fn latest_trip_points(&mut self, limit: i64) -> Result<Vec<WithId<TripPoint>>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(lock(&self.state)
            .trip_data
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert_trip_point(&mut self, point: TripPoint) -> Result<Id<TripPoint>> {
        let mut state = lock(&self.state);
        state.last_trip_id += 1;
        let id = Id::new(state.last_trip_id);
        state.trip_data.push(WithId::new(id, point));
        Ok(id)
    }
}
