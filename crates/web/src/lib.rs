pub use crate::common::RouteResult;

use std::path::Path;

use axum::{
    http::{header, HeaderValue},
    Router,
};
use config::ServerConfig;
use telemetry::{database::Database, SensorReadingService, TripPointService};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub mod api;
pub mod common;
pub mod config;

#[derive(Clone)]
pub struct WebState<D: Database> {
    pub sensor_service: SensorReadingService<D>,
    pub trip_service: TripPointService<D>,
}

impl<D: Database> WebState<D> {
    pub fn new(database: D) -> Self {
        Self {
            sensor_service: SensorReadingService::new(database.clone()),
            trip_service: TripPointService::new(database),
        }
    }
}

/// The whole application: the api under `/api`, static files everywhere else.
/// Every response allows any origin.
pub fn router<D: Database>(state: WebState<D>, static_dir: &Path) -> Router {
    Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
}

pub async fn start_web_server<D: Database>(
    config: &ServerConfig,
    state: WebState<D>,
) -> std::io::Result<()> {
    let routes = router(state, &config.static_dir);

    let listener = TcpListener::bind(config.bind_address).await?;
    log::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}
