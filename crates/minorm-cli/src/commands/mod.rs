pub mod describe;
pub mod find;
pub mod init_demo;

use clap::Args;
use minorm_core::logging_facility;
use minorm_store::StoreConfig;
use std::path::PathBuf;

/// Where the database lives
#[derive(Debug, Args)]
pub struct StoreArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Database file (overrides the configuration and MINORM_DATABASE)
    #[arg(short, long)]
    pub database: Option<String>,
}

impl StoreArgs {
    /// Resolve the effective configuration and start logging
    ///
    /// Precedence: file, then environment, then command-line flags.
    pub fn load(&self) -> Result<StoreConfig, Box<dyn std::error::Error>> {
        let mut config = StoreConfig::resolve(self.config.as_deref())?;
        if let Some(database) = &self.database {
            config.database = database.clone();
        }

        logging_facility::init(config.profile()?);
        tracing::debug!(database = %config.database, shared = config.shared, "resolved store configuration");
        Ok(config)
    }
}
