// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use clap::Parser;
use config::Config;
use events::{EventProducer, LogProducer, MongoProducer};
use log::info;
use memory_store::MemoryStore;
use movie_ratings::api::{self, AppState};
use postgres_store::PostgresStore;
use service::RatingService;
use simplelog::{LevelFilter, TermLogger, TerminalMode};
use std::sync::Arc;
use store::{GenreRepository, MovieRepository, RatingRepository, UserRepository};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Which database from the configuration to serve
    #[arg(short, long, default_value = "movie-ratings")]
    database: String,

    /// Keep everything in memory instead of connecting to PostgreSQL
    #[arg(long)]
    in_memory: bool,
}

fn producer_from(config: &Config) -> Result<Arc<dyn EventProducer>, Error> {
    let producer: Arc<dyn EventProducer> = match &config.events {
        Some(events) => Arc::new(MongoProducer::from_config(events)?),
        None => Arc::new(LogProducer),
    };

    Ok(producer)
}

fn app_state<S>(store: Arc<S>, config: &Config) -> Result<AppState, Error>
where
    S: UserRepository + MovieRepository + GenreRepository + RatingRepository + 'static,
{
    let producer = producer_from(config)?;

    let service = Arc::new(RatingService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        producer,
    ));

    Ok(AppState {
        users: store.clone(),
        movies: store.clone(),
        genres: store.clone(),
        ratings: store,
        service,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    TermLogger::init(
        LevelFilter::Info,
        simplelog::Config::default(),
        TerminalMode::Mixed,
    )?;

    let args = Args::parse();
    let config = Config::load(&args.config)?;

    let state = if args.in_memory {
        info!("Serving from in-memory tables");
        app_state(Arc::new(MemoryStore::new()), &config)?
    } else {
        info!("Connecting to database '{}'", args.database);
        let store = PostgresStore::from_config(&config, &args.database)?;
        app_state(Arc::new(store), &config)?
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Listening on {}", addr);

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
