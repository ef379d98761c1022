//! Store configuration
//!
//! Loaded from a TOML file, then overridden from the environment:
//!
//! ```toml
//! database = "students.db"   # or ":memory:"
//! foreign_keys = true
//! journal_mode = "wal"       # delete | truncate | persist | memory | wal | off
//! shared = true              # one connection behind a mutex, or one per lookup
//! log_profile = "development"
//! ```
//!
//! | variable             | overrides     |
//! |----------------------|---------------|
//! | `MINORM_DATABASE`    | `database`    |
//! | `MINORM_LOG_PROFILE` | `log_profile` |
//!
//! A `.env` file in the working directory is honoured via `dotenvy`.

use crate::errors::{config_error, io_error, Result};
use minorm_core::logging_facility::Profile;
use serde::Deserialize;
use std::path::Path;

pub const MEMORY_DATABASE: &str = ":memory:";
pub const ENV_DATABASE: &str = "MINORM_DATABASE";
pub const ENV_LOG_PROFILE: &str = "MINORM_LOG_PROFILE";

/// SQLite journal mode applied when a connection is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
    Delete,
    Truncate,
    Persist,
    Memory,
    #[default]
    Wal,
    Off,
}

impl JournalMode {
    pub fn as_pragma(&self) -> &'static str {
        match self {
            JournalMode::Delete => "DELETE",
            JournalMode::Truncate => "TRUNCATE",
            JournalMode::Persist => "PERSIST",
            JournalMode::Memory => "MEMORY",
            JournalMode::Wal => "WAL",
            JournalMode::Off => "OFF",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub database: String,
    pub foreign_keys: bool,
    pub journal_mode: JournalMode,
    pub shared: bool,
    pub log_profile: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: MEMORY_DATABASE.to_string(),
            foreign_keys: true,
            journal_mode: JournalMode::default(),
            shared: true,
            log_profile: "development".to_string(),
        }
    }
}

impl StoreConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: StoreConfig =
            toml::from_str(text).map_err(|e| config_error(format!("invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| io_error("read_config", e))?;
        Self::from_toml_str(&text)
    }

    /// Resolve the effective configuration
    ///
    /// Loads `.env` if present, reads `path` (defaults when `None`), then
    /// applies `MINORM_*` overrides from the process environment.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup and re-validate
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(database) = lookup(ENV_DATABASE) {
            self.database = database;
        }
        if let Some(profile) = lookup(ENV_LOG_PROFILE) {
            self.log_profile = profile;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn is_in_memory(&self) -> bool {
        self.database == MEMORY_DATABASE
    }

    /// The logging profile named by `log_profile`
    pub fn profile(&self) -> Result<Profile> {
        self.log_profile.parse::<Profile>().map_err(config_error)
    }

    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(config_error("database must not be empty"));
        }
        self.profile()?;
        Ok(())
    }
}
