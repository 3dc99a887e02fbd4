use anyhow::Error;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    pub psql_url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EventsConfig {
    pub mongo_url: String,
    pub mongo_db: String,
    pub collection: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub databases: HashMap<String, DatabaseConfig>,
    pub events: Option<EventsConfig>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let parsed: Self = toml::from_str(&contents)?;
        Ok(parsed)
    }
}
