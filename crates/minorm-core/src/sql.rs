//! Select-by-id statement synthesis
//!
//! The only statement this crate ever produces:
//!
//! ```text
//! select <column>, <column>, ... from <table> where <id column> = <placeholder>
//! ```
//!
//! No joins, ordering, or limits. Identifiers are emitted verbatim.

use crate::metadata::EntityDescriptor;

/// How the driver expects positional parameters to be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderStyle {
    /// `?` (SQLite, MySQL, JDBC)
    #[default]
    Question,
    /// `$1` (PostgreSQL)
    Numbered,
}

impl PlaceholderStyle {
    fn first(&self) -> &'static str {
        match self {
            PlaceholderStyle::Question => "?",
            PlaceholderStyle::Numbered => "$1",
        }
    }
}

/// A lookup statement with exactly one placeholder bound to the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectById {
    pub sql: String,
    pub placeholder: &'static str,
}

/// Build the lookup statement for a descriptor
pub fn build<T>(descriptor: &EntityDescriptor<T>, style: PlaceholderStyle) -> SelectById {
    let placeholder = style.first();
    let column_list = descriptor.column_names().collect::<Vec<_>>().join(", ");
    let sql = format!(
        "select {} from {} where {} = {}",
        column_list,
        descriptor.table_name(),
        descriptor.id_column(),
        placeholder
    );

    SelectById { sql, placeholder }
}
