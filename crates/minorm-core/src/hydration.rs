//! Hydration layer - turns a fetched row into an entity instance
//!
//! Starts from `T::default()` and fills every mapped field from the column of
//! the same resolved name. Coercion policy per field kind:
//!
//! | kind  | accepted values                              |
//! |-------|----------------------------------------------|
//! | text  | text                                         |
//! | int32 | integer within `i32` range, boolean as 0/1   |
//! | int64 | integer, boolean as 0/1                      |
//! | bool  | boolean, integer (0 is false)                |
//! | date  | date, text in `%Y-%m-%d`                     |
//! | enum  | text equal to a declared member name         |
//!
//! Text, integer and boolean fields declared as `Option` take NULL as `None`.
//! NULL in any other field is an error; a NULL date is reported as such.

use crate::entity::{Entity, FieldAccessor, FieldKind};
use crate::errors::EntityMappingError;
use crate::metadata::{ColumnMapping, EntityDescriptor};
use crate::value::{Row, SqlValue};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Build a fresh instance of `T` from `row`
pub fn hydrate<T: Entity>(
    descriptor: &EntityDescriptor<T>,
    row: &Row,
) -> Result<T, EntityMappingError> {
    let mut instance = T::default();

    for mapping in descriptor.columns() {
        let value = row
            .get(mapping.column())
            .ok_or_else(|| EntityMappingError::MissingColumn {
                entity: descriptor.type_name().to_string(),
                field: mapping.field().to_string(),
                column: mapping.column().to_string(),
            })?;

        apply_column(descriptor.type_name(), mapping, value, &mut instance)?;
    }

    Ok(instance)
}

fn apply_column<T>(
    entity: &str,
    mapping: &ColumnMapping<T>,
    value: &SqlValue,
    target: &mut T,
) -> Result<(), EntityMappingError> {
    let ctx = Ctx { entity, mapping };

    if value.is_null() {
        return assign_null(&ctx, target);
    }

    match mapping.accessor() {
        FieldAccessor::Text(field) => *field(target) = ctx.text(value)?,
        FieldAccessor::OptionalText(field) => *field(target) = Some(ctx.text(value)?),
        FieldAccessor::Int32(field) => *field(target) = ctx.int32(value)?,
        FieldAccessor::OptionalInt32(field) => *field(target) = Some(ctx.int32(value)?),
        FieldAccessor::Int64(field) => *field(target) = ctx.integer(value)?,
        FieldAccessor::OptionalInt64(field) => *field(target) = Some(ctx.integer(value)?),
        FieldAccessor::Bool(field) => *field(target) = ctx.boolean(value)?,
        FieldAccessor::OptionalBool(field) => *field(target) = Some(ctx.boolean(value)?),
        FieldAccessor::Date(field) => {
            *field(target) = match value {
                SqlValue::Date(date) => *date,
                SqlValue::Text(text) => NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(
                    |_| EntityMappingError::InvalidDate {
                        entity: ctx.entity.to_string(),
                        field: ctx.field(),
                        value: text.clone(),
                    },
                )?,
                other => return Err(ctx.mismatch(other)),
            };
        }
        FieldAccessor::Enum(accessor) => {
            let text = match value {
                SqlValue::Text(text) => text,
                other => return Err(ctx.mismatch(other)),
            };
            if !accessor.assign(target, text) {
                return Err(EntityMappingError::UnknownEnumMember {
                    entity: ctx.entity.to_string(),
                    field: ctx.field(),
                    enum_name: accessor.enum_name().to_string(),
                    value: text.clone(),
                });
            }
        }
    }

    Ok(())
}

/// NULL fills `Option` fields with `None` and is an error for everything else
fn assign_null<T>(ctx: &Ctx<'_, T>, target: &mut T) -> Result<(), EntityMappingError> {
    match ctx.mapping.accessor() {
        FieldAccessor::OptionalText(field) => *field(target) = None,
        FieldAccessor::OptionalInt32(field) => *field(target) = None,
        FieldAccessor::OptionalInt64(field) => *field(target) = None,
        FieldAccessor::OptionalBool(field) => *field(target) = None,
        FieldAccessor::Date(_) => {
            return Err(EntityMappingError::NullDate {
                entity: ctx.entity.to_string(),
                field: ctx.field(),
                column: ctx.mapping.column().to_string(),
            })
        }
        _ => {
            return Err(EntityMappingError::UnexpectedNull {
                entity: ctx.entity.to_string(),
                field: ctx.field(),
                column: ctx.mapping.column().to_string(),
            })
        }
    }
    Ok(())
}

/// Error-building context for one column
struct Ctx<'a, T> {
    entity: &'a str,
    mapping: &'a ColumnMapping<T>,
}

impl<T> Ctx<'_, T> {
    fn field(&self) -> String {
        self.mapping.field().to_string()
    }

    fn mismatch(&self, found: &SqlValue) -> EntityMappingError {
        EntityMappingError::TypeMismatch {
            entity: self.entity.to_string(),
            field: self.field(),
            expected: self.mapping.kind().to_string(),
            found: format!("{} {}", found.kind_name(), found),
        }
    }

    fn text(&self, value: &SqlValue) -> Result<String, EntityMappingError> {
        match value {
            SqlValue::Text(text) => Ok(text.clone()),
            other => Err(self.mismatch(other)),
        }
    }

    fn integer(&self, value: &SqlValue) -> Result<i64, EntityMappingError> {
        match value {
            SqlValue::Integer(number) => Ok(*number),
            SqlValue::Bool(flag) => Ok(i64::from(*flag)),
            other => Err(self.mismatch(other)),
        }
    }

    fn int32(&self, value: &SqlValue) -> Result<i32, EntityMappingError> {
        let wide = self.integer(value)?;
        i32::try_from(wide).map_err(|_| EntityMappingError::OutOfRange {
            entity: self.entity.to_string(),
            field: self.field(),
            expected: FieldKind::Int32.to_string(),
            value: wide,
        })
    }

    fn boolean(&self, value: &SqlValue) -> Result<bool, EntityMappingError> {
        match value {
            SqlValue::Bool(flag) => Ok(*flag),
            SqlValue::Integer(number) => Ok(*number != 0),
            other => Err(self.mismatch(other)),
        }
    }
}
