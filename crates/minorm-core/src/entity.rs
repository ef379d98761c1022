//! Declarative entity descriptions
//!
//! A type opts into the mapper by implementing [`Entity`] and returning an
//! [`EntityDef`] that carries the markers the resolver validates:
//!
//! - entity marker: set by [`EntityDef::new`], absent from [`EntityDef::unmarked`]
//! - table marker: [`EntityDef::table`]
//! - id marker: [`FieldDef::id`]
//! - column marker: [`FieldDef::column`]
//!
//! ```
//! use minorm_core::{Entity, EntityDef, FieldDef};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Widget {
//!     id: i64,
//!     label: String,
//!     active: bool,
//! }
//!
//! impl Entity for Widget {
//!     fn describe() -> EntityDef<Self> {
//!         EntityDef::new()
//!             .table("widgets")
//!             .field(FieldDef::int64("id", |w: &mut Widget| &mut w.id).id())
//!             .field(FieldDef::text("label", |w: &mut Widget| &mut w.label))
//!             .field(FieldDef::boolean("active", |w: &mut Widget| &mut w.active).column("is_active"))
//!     }
//! }
//! ```

use chrono::NaiveDate;

/// A struct that can be loaded by primary key
///
/// `Default` plays the role of the parameterless constructor: hydration
/// starts from `T::default()` and overwrites every mapped field.
pub trait Entity: Default + Sized + 'static {
    /// Describe the table, key and columns of this type
    fn describe() -> EntityDef<Self>;
}

/// A fieldless enum stored as the text of one of its member names
pub trait EntityEnum: Sized + 'static {
    /// Name used in error messages
    const NAME: &'static str;

    /// Declared member names, matched case-sensitively
    const MEMBERS: &'static [&'static str];

    fn from_member(member: &str) -> Option<Self>;
}

/// Closed set of field kinds the hydrator knows how to fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Int32,
    Int64,
    Bool,
    Date,
    Enum { name: &'static str },
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Int32 => write!(f, "int32"),
            FieldKind::Int64 => write!(f, "int64"),
            FieldKind::Bool => write!(f, "boolean"),
            FieldKind::Date => write!(f, "date"),
            FieldKind::Enum { name } => write!(f, "enum {}", name),
        }
    }
}

/// Typed write access to one field of `T`
///
/// The variant fixes the field kind, so the coercion for a column is chosen
/// once when the description is written rather than per row.
pub enum FieldAccessor<T> {
    Text(fn(&mut T) -> &mut String),
    Int32(fn(&mut T) -> &mut i32),
    Int64(fn(&mut T) -> &mut i64),
    Bool(fn(&mut T) -> &mut bool),
    Date(fn(&mut T) -> &mut NaiveDate),
    Enum(EnumAccessor<T>),
    OptionalText(fn(&mut T) -> &mut Option<String>),
    OptionalInt32(fn(&mut T) -> &mut Option<i32>),
    OptionalInt64(fn(&mut T) -> &mut Option<i64>),
    OptionalBool(fn(&mut T) -> &mut Option<bool>),
}

impl<T> FieldAccessor<T> {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldAccessor::Text(_) | FieldAccessor::OptionalText(_) => FieldKind::Text,
            FieldAccessor::Int32(_) | FieldAccessor::OptionalInt32(_) => FieldKind::Int32,
            FieldAccessor::Int64(_) | FieldAccessor::OptionalInt64(_) => FieldKind::Int64,
            FieldAccessor::Bool(_) | FieldAccessor::OptionalBool(_) => FieldKind::Bool,
            FieldAccessor::Date(_) => FieldKind::Date,
            FieldAccessor::Enum(accessor) => FieldKind::Enum {
                name: accessor.enum_name,
            },
        }
    }
}

impl<T> FieldAccessor<T> {
    /// Whether the field is an `Option` that takes NULL as `None`
    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            FieldAccessor::OptionalText(_)
                | FieldAccessor::OptionalInt32(_)
                | FieldAccessor::OptionalInt64(_)
                | FieldAccessor::OptionalBool(_)
        )
    }
}

impl<T> std::fmt::Debug for FieldAccessor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_nullable() {
            write!(f, "FieldAccessor(optional {})", self.kind())
        } else {
            write!(f, "FieldAccessor({})", self.kind())
        }
    }
}

type AssignMember<T> = Box<dyn Fn(&mut T, &str) -> bool + Send + Sync>;

/// Accessor for an [`EntityEnum`] field, erased over the enum type
pub struct EnumAccessor<T> {
    enum_name: &'static str,
    members: &'static [&'static str],
    assign: AssignMember<T>,
}

impl<T> EnumAccessor<T> {
    pub fn enum_name(&self) -> &'static str {
        self.enum_name
    }

    pub fn members(&self) -> &'static [&'static str] {
        self.members
    }

    /// Set the field to the member named `text`; false when nothing matches
    pub fn assign(&self, target: &mut T, text: &str) -> bool {
        (self.assign)(target, text)
    }
}

/// Description of one struct field
#[derive(Debug)]
pub struct FieldDef<T> {
    pub(crate) name: &'static str,
    pub(crate) column: Option<String>,
    pub(crate) id: bool,
    pub(crate) accessor: FieldAccessor<T>,
}

impl<T: 'static> FieldDef<T> {
    fn with_accessor(name: &'static str, accessor: FieldAccessor<T>) -> Self {
        Self {
            name,
            column: None,
            id: false,
            accessor,
        }
    }

    pub fn text(name: &'static str, field: fn(&mut T) -> &mut String) -> Self {
        Self::with_accessor(name, FieldAccessor::Text(field))
    }

    pub fn int32(name: &'static str, field: fn(&mut T) -> &mut i32) -> Self {
        Self::with_accessor(name, FieldAccessor::Int32(field))
    }

    pub fn int64(name: &'static str, field: fn(&mut T) -> &mut i64) -> Self {
        Self::with_accessor(name, FieldAccessor::Int64(field))
    }

    pub fn boolean(name: &'static str, field: fn(&mut T) -> &mut bool) -> Self {
        Self::with_accessor(name, FieldAccessor::Bool(field))
    }

    pub fn date(name: &'static str, field: fn(&mut T) -> &mut NaiveDate) -> Self {
        Self::with_accessor(name, FieldAccessor::Date(field))
    }

    pub fn optional_text(name: &'static str, field: fn(&mut T) -> &mut Option<String>) -> Self {
        Self::with_accessor(name, FieldAccessor::OptionalText(field))
    }

    pub fn optional_int32(name: &'static str, field: fn(&mut T) -> &mut Option<i32>) -> Self {
        Self::with_accessor(name, FieldAccessor::OptionalInt32(field))
    }

    pub fn optional_int64(name: &'static str, field: fn(&mut T) -> &mut Option<i64>) -> Self {
        Self::with_accessor(name, FieldAccessor::OptionalInt64(field))
    }

    pub fn optional_boolean(name: &'static str, field: fn(&mut T) -> &mut Option<bool>) -> Self {
        Self::with_accessor(name, FieldAccessor::OptionalBool(field))
    }

    pub fn enumeration<E: EntityEnum>(name: &'static str, field: fn(&mut T) -> &mut E) -> Self {
        let assign = move |target: &mut T, text: &str| match E::from_member(text) {
            Some(member) => {
                *field(target) = member;
                true
            }
            None => false,
        };
        Self::with_accessor(
            name,
            FieldAccessor::Enum(EnumAccessor {
                enum_name: E::NAME,
                members: E::MEMBERS,
                assign: Box::new(assign),
            }),
        )
    }

    /// Put the id marker on this field
    pub fn id(mut self) -> Self {
        self.id = true;
        self
    }

    /// Put the column marker on this field, overriding the inferred name
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.column = Some(name.into());
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.accessor.kind()
    }
}

/// Unvalidated description of an entity type
///
/// Fields are kept in the order they were added, which should follow the
/// struct's declaration order.
#[derive(Debug)]
pub struct EntityDef<T> {
    pub(crate) entity: bool,
    pub(crate) table: Option<String>,
    pub(crate) fields: Vec<FieldDef<T>>,
}

impl<T: 'static> EntityDef<T> {
    /// Start a description carrying the entity marker
    pub fn new() -> Self {
        Self {
            entity: true,
            table: None,
            fields: Vec::new(),
        }
    }

    /// Start a description without the entity marker
    pub fn unmarked() -> Self {
        Self {
            entity: false,
            ..Self::new()
        }
    }

    /// Put the table marker on the type
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.table = Some(name.into());
        self
    }

    pub fn field(mut self, field: FieldDef<T>) -> Self {
        self.fields.push(field);
        self
    }
}

impl<T: 'static> Default for EntityDef<T> {
    fn default() -> Self {
        Self::new()
    }
}
