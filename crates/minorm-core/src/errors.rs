use thiserror::Error;

/// Result type alias using OrmError
pub type Result<T> = std::result::Result<T, OrmError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on without
/// depending on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrmErrorKind {
    // Structural
    Validation,

    // Row conversion
    EntityMapping,

    // Store
    Query,
    AmbiguousResult,
}

impl OrmErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            OrmErrorKind::Validation => "ERR_VALIDATION",
            OrmErrorKind::EntityMapping => "ERR_ENTITY_MAPPING",
            OrmErrorKind::Query => "ERR_QUERY",
            OrmErrorKind::AmbiguousResult => "ERR_AMBIGUOUS_RESULT",
        }
    }
}

/// Top-level error returned by the entity manager
///
/// The three variants are disjoint: a type that is not a mappable entity,
/// a fetched row that cannot become an instance, and a store failure.
/// A missing row is not an error at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrmError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Mapping(#[from] EntityMappingError),

    #[error(transparent)]
    Query(#[from] QueryError),
}

impl OrmError {
    /// Get the error kind
    pub fn kind(&self) -> OrmErrorKind {
        match self {
            OrmError::Validation(_) => OrmErrorKind::Validation,
            OrmError::Mapping(_) => OrmErrorKind::EntityMapping,
            OrmError::Query(QueryError::AmbiguousResult { .. }) => OrmErrorKind::AmbiguousResult,
            OrmError::Query(_) => OrmErrorKind::Query,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Name of the entity type the failure relates to
    pub fn entity(&self) -> &str {
        match self {
            OrmError::Validation(err) => err.entity(),
            OrmError::Mapping(err) => err.entity(),
            OrmError::Query(err) => err.entity(),
        }
    }
}

// ========== End Error Facility ==========

/// The type does not qualify as a mappable entity
///
/// Raised purely from the type's description, before any connection is
/// acquired.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Type {entity} is not an entity since the entity marker is not present")]
    NotAnEntity { entity: String },

    #[error("Entity {entity} does not have a table marker, so there is no way to get a table name")]
    MissingTable { entity: String },

    #[error("Table name of the entity {entity} is empty")]
    EmptyTableName { entity: String },

    #[error("Entity {entity} does not have a field with the id marker, so there is no way to detect the primary key")]
    MissingId { entity: String },

    #[error("Entity {entity} has more than one field with the id marker: {fields:?}")]
    MultipleIds { entity: String, fields: Vec<String> },

    #[error("Entity {entity} has unexpected type of id field '{field}': {kind} (expected int64)")]
    InvalidIdKind {
        entity: String,
        field: String,
        kind: String,
    },

    #[error("Column name of field '{field}' in entity {entity} is empty")]
    EmptyColumnName { entity: String, field: String },

    #[error("Entity {entity} maps fields '{first}' and '{second}' to the same column '{column}'")]
    DuplicateColumn {
        entity: String,
        column: String,
        first: String,
        second: String,
    },
}

impl ValidationError {
    /// Name of the offending type
    pub fn entity(&self) -> &str {
        match self {
            ValidationError::NotAnEntity { entity }
            | ValidationError::MissingTable { entity }
            | ValidationError::EmptyTableName { entity }
            | ValidationError::MissingId { entity }
            | ValidationError::MultipleIds { entity, .. }
            | ValidationError::InvalidIdKind { entity, .. }
            | ValidationError::EmptyColumnName { entity, .. }
            | ValidationError::DuplicateColumn { entity, .. } => entity,
        }
    }
}

/// A fetched row cannot be turned into an instance of the entity
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntityMappingError {
    #[error("Cannot extract value for field '{field}' of {entity}: column '{column}' is absent from the row")]
    MissingColumn {
        entity: String,
        field: String,
        column: String,
    },

    #[error("Cannot fill field '{field}' of {entity}: column '{column}' is NULL")]
    UnexpectedNull {
        entity: String,
        field: String,
        column: String,
    },

    #[error("Cannot fill date field '{field}' of {entity}: column '{column}' holds no date")]
    NullDate {
        entity: String,
        field: String,
        column: String,
    },

    #[error("Cannot fill field '{field}' of {entity}: expected {expected}, found {found}")]
    TypeMismatch {
        entity: String,
        field: String,
        expected: String,
        found: String,
    },

    #[error("Cannot fill field '{field}' of {entity}: value {value} does not fit into {expected}")]
    OutOfRange {
        entity: String,
        field: String,
        expected: String,
        value: i64,
    },

    #[error("Cannot fill date field '{field}' of {entity}: '{value}' is not a valid date")]
    InvalidDate {
        entity: String,
        field: String,
        value: String,
    },

    #[error("Cannot fill field '{field}' of {entity}: '{value}' is not a member of enum {enum_name}")]
    UnknownEnumMember {
        entity: String,
        field: String,
        enum_name: String,
        value: String,
    },
}

impl EntityMappingError {
    /// Name of the entity type being hydrated
    pub fn entity(&self) -> &str {
        match self {
            EntityMappingError::MissingColumn { entity, .. }
            | EntityMappingError::UnexpectedNull { entity, .. }
            | EntityMappingError::NullDate { entity, .. }
            | EntityMappingError::TypeMismatch { entity, .. }
            | EntityMappingError::OutOfRange { entity, .. }
            | EntityMappingError::InvalidDate { entity, .. }
            | EntityMappingError::UnknownEnumMember { entity, .. } => entity,
        }
    }

    /// Name of the field that could not be filled
    pub fn field(&self) -> &str {
        match self {
            EntityMappingError::MissingColumn { field, .. }
            | EntityMappingError::UnexpectedNull { field, .. }
            | EntityMappingError::NullDate { field, .. }
            | EntityMappingError::TypeMismatch { field, .. }
            | EntityMappingError::OutOfRange { field, .. }
            | EntityMappingError::InvalidDate { field, .. }
            | EntityMappingError::UnknownEnumMember { field, .. } => field,
        }
    }
}

/// The connection provider failed to run the lookup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Error during selecting entity {entity} by id {id}: {source}")]
    Execution {
        entity: String,
        id: i64,
        source: StoreError,
    },

    #[error("Selecting entity {entity} by id {id} returned {rows} rows, expected at most one")]
    AmbiguousResult { entity: String, id: i64, rows: usize },
}

impl QueryError {
    /// Name of the entity type being selected
    pub fn entity(&self) -> &str {
        match self {
            QueryError::Execution { entity, .. } | QueryError::AmbiguousResult { entity, .. } => {
                entity
            }
        }
    }

    /// Requested primary key
    pub fn id(&self) -> i64 {
        match self {
            QueryError::Execution { id, .. } | QueryError::AmbiguousResult { id, .. } => *id,
        }
    }
}

/// Low-level failure reported by a connection provider
///
/// Drivers convert their native errors into this type at the boundary so the
/// core never depends on a particular driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Cannot acquire connection: {message}")]
    Acquire { message: String },

    #[error("Statement failed in operation '{op}': {message}")]
    Statement { op: String, message: String },

    #[error("Cannot decode column '{column}': {message}")]
    Decode { column: String, message: String },

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("I/O error in operation '{op}': {message}")]
    Io { op: String, message: String },
}
