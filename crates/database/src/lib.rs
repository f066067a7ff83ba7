use std::{error, fmt, str::FromStr, sync::Arc};

use async_trait::async_trait;
use queries::convert_connection_error;
use sqlx::{
    postgres::{PgConnectOptions, PgConnection},
    Connection,
};
use telemetry::database::{Database, DatabaseConnection, DatabaseError};

pub mod data_model;
pub mod queries;

const LOCAL_HOST: &str = "localhost";
const LOCAL_PORT: u16 = 5432;
const LOCAL_USER: &str = "agrinav";
const LOCAL_PASSWORD: &str = "agrinav";
const LOCAL_DATABASE: &str = "agrinav_db";

/// A configuration variable which was set, but could not be used.
#[derive(Debug, Clone)]
pub struct ConnectionInfoError {
    pub variable: &'static str,
    pub reason: String,
}

impl error::Error for ConnectionInfoError {}

impl fmt::Display for ConnectionInfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.variable, self.reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionSource {
    /// `DATABASE_URL`
    Url,
    /// `DATABASE_USER`, `DATABASE_PASSWORD`, `DATABASE_HOST`, `DATABASE_PORT`
    /// and `DATABASE_NAME`
    Parameters,
    LocalFallback,
}

#[derive(Debug, Clone)]
pub struct DatabaseConnectionInfo {
    pub source: ConnectionSource,
    options: PgConnectOptions,
}

impl DatabaseConnectionInfo {
    pub fn from_env() -> Result<Self, ConnectionInfoError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Resolves the connection from `var`, preferring a connection string over
    /// single parameters over the local fallback.
    pub fn from_vars<F>(var: F) -> Result<Self, ConnectionInfoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("DATABASE_URL") {
            return Self::from_url(&url);
        }

        let parameters = [
            var("DATABASE_USER"),
            var("DATABASE_PASSWORD"),
            var("DATABASE_HOST"),
            var("DATABASE_PORT"),
            var("DATABASE_NAME"),
        ];
        match parameters {
            [Some(username), Some(password), Some(hostname), Some(port), Some(database)] => {
                let port: u16 = port.parse().map_err(|why| ConnectionInfoError {
                    variable: "DATABASE_PORT",
                    reason: format!("{}", why),
                })?;
                Ok(Self {
                    source: ConnectionSource::Parameters,
                    options: PgConnectOptions::new()
                        .host(&hostname)
                        .port(port)
                        .username(&username)
                        .password(&password)
                        .database(&database),
                })
            }
            [None, None, None, None, None] => Ok(Self::local()),
            _ => {
                log::warn!(
                    "database parameters are only partially set, using the local database"
                );
                Ok(Self::local())
            }
        }
    }

    pub fn from_url(url: &str) -> Result<Self, ConnectionInfoError> {
        let options =
            PgConnectOptions::from_str(url).map_err(|why| ConnectionInfoError {
                variable: "DATABASE_URL",
                reason: format!("{}", why),
            })?;
        Ok(Self {
            source: ConnectionSource::Url,
            options,
        })
    }

    pub fn local() -> Self {
        Self {
            source: ConnectionSource::LocalFallback,
            options: PgConnectOptions::new()
                .host(LOCAL_HOST)
                .port(LOCAL_PORT)
                .username(LOCAL_USER)
                .password(LOCAL_PASSWORD)
                .database(LOCAL_DATABASE),
        }
    }

    pub fn options(&self) -> &PgConnectOptions {
        &self.options
    }
}

/// Shows where the connection goes, without the password.
impl fmt::Display for DatabaseConnectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "postgres://{}@{}:{}/{} ({:?})",
            self.options.get_username(),
            self.options.get_host(),
            self.options.get_port(),
            self.options.get_database().unwrap_or(""),
            self.source
        )
    }
}

/// Postgres backed telemetry database.
///
/// Does not pool: every `acquire` opens a new connection, which is closed again
/// on `release`.
#[derive(Debug, Clone)]
pub struct PgDatabase {
    connection_info: Arc<DatabaseConnectionInfo>,
}

pub struct PgDatabaseConnection {
    connection: PgConnection,
}

impl PgDatabase {
    pub fn new(connection_info: DatabaseConnectionInfo) -> Self {
        Self {
            connection_info: Arc::new(connection_info),
        }
    }

    /// Creates the tables if they do not exist yet. Existing tables are left
    /// untouched.
    pub async fn bootstrap_schema(&self) -> telemetry::database::Result<()> {
        self.scoped(|connection| {
            Box::pin(async move {
                queries::schema::create_tables(&mut connection.connection).await
            })
        })
        .await
    }
}

#[async_trait]
impl Database for PgDatabase {
    type Connection = PgDatabaseConnection;

    async fn acquire(&self) -> telemetry::database::Result<Self::Connection> {
        let connection = PgConnection::connect_with(self.connection_info.options())
            .await
            .map_err(|why| {
                log::error!(
                    "could not connect to {}: {}",
                    self.connection_info,
                    why
                );
                convert_connection_error(why)
            })?;
        Ok(PgDatabaseConnection { connection })
    }
}

#[async_trait]
impl DatabaseConnection for PgDatabaseConnection {
    async fn release(self) -> telemetry::database::Result<()> {
        self.connection
            .close()
            .await
            .map_err(|why| DatabaseError::Connection(Box::new(why)))
    }
}
