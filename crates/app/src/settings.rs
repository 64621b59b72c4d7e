//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml`, then from `DONATIONS__*` environment variables.
//!
//! ```toml
//! [app]
//! level = "info"
//!
//! [server]
//! port = 8000
//! database = { sqlite = "donations.db" }
//!
//! [reconciliation]
//! data_dir = "./data"
//! secondary_csv = "./data/internal_donations.csv"
//!
//! [organization]
//! name = "Spark Creatives"
//! logo_path = "./assets/logo.png"
//! email_provider = "smtp"
//! ```
use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use server::Organization;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

fn default_level() -> String {
    String::from("info")
}

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_port() -> u16 {
    8000
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Default, Deserialize)]
pub struct Reconciliation {
    pub data_dir: Option<PathBuf>,
    pub secondary_csv: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
    #[serde(default)]
    pub reconciliation: Reconciliation,
    #[serde(default)]
    pub organization: Organization,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("DONATIONS").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
