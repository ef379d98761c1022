//! Init-demo command
//!
//! Usage: minorm init-demo [--config <FILE>] [--database <FILE>]

use super::StoreArgs;
use clap::Args;
use minorm_store::SqliteProvider;

/// Table layout matching the `Student` mapping
pub const STUDENTS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id          INTEGER PRIMARY KEY,
    email       TEXT NOT NULL,
    first_name  TEXT NOT NULL,
    last_name   TEXT NOT NULL,
    birthday    TEXT NOT NULL,
    has_scholarship INTEGER NOT NULL,
    status      TEXT NOT NULL
);
"#;

const SAMPLE_STUDENT: &str = r#"
INSERT OR IGNORE INTO students (id, email, first_name, last_name, birthday, has_scholarship, status)
VALUES (1, 'ada.lovelace@example.com', 'Ada', 'Lovelace', '1815-12-10', 1, 'ACTIVE');
"#;

#[derive(Debug, Args)]
pub struct InitDemoArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

/// Execute init-demo command
pub fn execute(args: InitDemoArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.store.load()?;
    if config.is_in_memory() {
        return Err("init-demo needs a database file; pass --database or set MINORM_DATABASE".into());
    }

    let provider = SqliteProvider::from_config(&config)?;
    provider.execute_batch(STUDENTS_SCHEMA)?;
    provider.execute_batch(SAMPLE_STUDENT)?;

    println!("✓ Initialized {} with sample student 1", config.database);
    Ok(())
}
