//! minorm CLI
//!
//! Command-line driver for the entity manager, wired to the demo `Student`
//! entity and a SQLite database.

use clap::{Parser, Subcommand};

mod commands;
mod model;

#[derive(Debug, Parser)]
#[command(name = "minorm")]
#[command(about = "minorm - load entities by primary key", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load one student by id and print it
    FindStudent(commands::find::FindStudentArgs),
    /// Print the resolved student mapping and its lookup SQL
    DescribeStudent(commands::describe::DescribeStudentArgs),
    /// Create the students table and insert a sample student
    InitDemo(commands::init_demo::InitDemoArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::FindStudent(args) => commands::find::execute(args),
        Commands::DescribeStudent(args) => commands::describe::execute(args),
        Commands::InitDemo(args) => commands::init_demo::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
