use database::PgDatabase;
use web::{config::ServerConfig, start_web_server, WebState};

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = ServerConfig::from_env().expect("invalid configuration in env.");
    log::info!("using database {}", config.database);

    // database
    let database = PgDatabase::new(config.database.clone());
    if config.bootstrap_schema {
        if let Err(why) = database.bootstrap_schema().await {
            log::error!("could not create tables, continuing anyway: {}", why);
        }
    }

    // web server
    if let Err(why) = start_web_server(&config, WebState::new(database)).await {
        log::error!("web server stopped: {}", why);
        std::process::exit(1);
    }
}
