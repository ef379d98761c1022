//! Find command
//!
//! Usage: minorm find-student <ID> [--config <FILE>] [--database <FILE>]

use super::StoreArgs;
use crate::model::Student;
use clap::Args;
use minorm_core::EntityManager;
use minorm_store::SqliteProvider;

#[derive(Debug, Args)]
pub struct FindStudentArgs {
    /// Student id to look up
    pub id: i64,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Execute find-student command
pub fn execute(args: FindStudentArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.store.load()?;
    let manager = EntityManager::new(SqliteProvider::from_config(&config)?);

    match manager.fetch_by_id::<Student>(args.id)? {
        Some(student) => println!("Student (found by entity manager): {}", student),
        None => println!("Student {} not found", args.id),
    }

    Ok(())
}
