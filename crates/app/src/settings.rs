//! Handles settings for the application.
//!
//! Values come, in increasing priority, from built-in defaults, an optional
//! `settings.toml` in the working directory and `ACCOUNTANCY__*` environment
//! variables (e.g. `ACCOUNTANCY__LEDGER__CURRENCY=USD`).
use accountancy::Currency;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// `tracing` level applied to the workspace crates.
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Database {
    /// SeaORM connection string.
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct Ledger {
    pub currency: Currency,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub database: Database,
    pub ledger: Ledger,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("database.url", "sqlite:./accountancy.db?mode=rwc")?
            .set_default("ledger.currency", "EUR")?
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("ACCOUNTANCY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
