//! Describe command
//!
//! Usage: minorm describe-student [--numbered]

use crate::model::Student;
use clap::Args;
use minorm_core::entity::FieldAccessor;
use minorm_core::{resolve, sql, PlaceholderStyle};

#[derive(Debug, Args)]
pub struct DescribeStudentArgs {
    /// Use `$1` instead of `?` for the id placeholder
    #[arg(long)]
    pub numbered: bool,
}

/// Execute describe-student command
pub fn execute(args: DescribeStudentArgs) -> Result<(), Box<dyn std::error::Error>> {
    let descriptor = resolve::<Student>()?;
    let style = if args.numbered {
        PlaceholderStyle::Numbered
    } else {
        PlaceholderStyle::Question
    };

    println!("entity:    {}", descriptor.type_name());
    println!("table:     {}", descriptor.table_name());
    println!("id column: {}", descriptor.id_column());
    println!("columns:");
    for mapping in descriptor.columns() {
        println!(
            "  {:<16} <- {:<12} ({})",
            mapping.column(),
            mapping.field(),
            mapping.kind()
        );
        if let FieldAccessor::Enum(accessor) = mapping.accessor() {
            println!("  {:<16}    one of {}", "", accessor.members().join(", "));
        }
    }
    println!("sql:       {}", sql::build(&*descriptor, style).sql);

    Ok(())
}
