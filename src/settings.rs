//! Runtime settings. Read from an optional `settings.toml` in the working
//! directory, then overridden by `SPLIT_LEDGER__<SECTION>__<KEY>` variables.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct App {
    /// Log level for the crate's own targets.
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    /// Leave fully settled entries out of the report.
    pub outstanding_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app: App,
    pub report: Report,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: App {
                level: "info".into(),
            },
            report: Report {
                outstanding_only: false,
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file("settings")
    }

    pub fn from_file(name: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app.level", "info")?
            .set_default("report.outstanding_only", false)?
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("SPLIT_LEDGER").separator("__"))
            .build()?
            .try_deserialize()
    }
}
