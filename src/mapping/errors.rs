//! # Mapping Error Types
//!
//! Errors raised while deriving CQL schema from mapped entity definitions.
//!
//! ## Error Categories
//!
//! - **Configuration Errors**: the declared mapping is malformed or unsupported
//!   (wrong number of type arguments, unknown primitive types, cyclic composite
//!   keys, broken definition files). Surfaced once per entity at startup.
//! - **State Errors**: a caller asked for something the wiring cannot provide
//!   (single column name of a multi-column property, composite key flattening
//!   without an entity lookup).
//! - **Unsupported Operations**: capabilities the column-family model does not
//!   have, such as associations between entities.
//!
//! Configuration errors always name the property, its declared type and the
//! owning entity so a broken mapping can be located without a debugger:
//!
//! ```ignore
//! // ✅ GOOD: property, type and entity are all present
//! MappingError::UnknownType {
//!     property: "location".to_string(),
//!     declared_type: "GeoPoint".to_string(),
//!     entity: "Reading".to_string(),
//! }
//! ```

use thiserror::Error;

/// Coarse classification of a [`MappingError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or unsupported mapping declared by the user
    Configuration,
    /// Internal precondition violated by the surrounding wiring
    State,
    /// Deliberately absent capability
    UnsupportedOperation,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MappingError {
    #[error("expected {expected} type arguments but found {found} for the property '{property}' type is '{declared_type}' in the entity {entity}")]
    TypeArgumentCount {
        property: String,
        declared_type: String,
        entity: String,
        expected: usize,
        found: usize,
    },
    #[error("unknown type for property [{property}], type [{declared_type}] in entity [{entity}]; only primitive types and collections or maps of primitive types are allowed")]
    UnknownType {
        property: String,
        declared_type: String,
        entity: String,
    },
    #[error("only primitive types are allowed inside collections for the property '{property}' type is '{declared_type}' in the entity {entity}")]
    NonPrimitiveElement {
        property: String,
        declared_type: String,
        entity: String,
    },
    #[error("primary key column '{property}' of entity {entity} resolves to collection type '{column_type}'")]
    CollectionKeyColumn {
        property: String,
        column_type: String,
        entity: String,
    },
    #[error("composite primary key cycle detected at property '{property}' in entity {entity}: {chain}")]
    CompositeKeyCycle {
        property: String,
        entity: String,
        chain: String,
    },
    #[error("entity '{entity}' is already registered")]
    DuplicateEntity { entity: String },
    #[error("property '{property}' is declared twice in entity {entity}")]
    DuplicateProperty { property: String, entity: String },
    #[error("invalid CQL identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },
    #[error("failed to evaluate expression '{expression}': {message}")]
    Expression { expression: String, message: String },
    #[error("invalid keyspace specification: {message}")]
    InvalidKeyspace { message: String },
    #[error("column '{column}' is mapped more than once in entity {entity}")]
    DuplicateColumn { column: String, entity: String },
    #[error("table for entity {entity} has no partition key column")]
    MissingPartitionKey { entity: String },
    #[error("Failed to read mapping definition: {error}")]
    DefinitionRead { error: String },
    #[error("Failed to parse mapping definition: {error}")]
    DefinitionParse { error: String },
    #[error("Invalid mapping definition: {message}")]
    InvalidDefinition { message: String },

    #[error("property '{property}' in entity {entity} does not have a single column mapping ({count} columns)")]
    NotSingleColumn {
        property: String,
        entity: String,
        count: usize,
    },
    #[error("need a mapping context to resolve composite primary key type '{type_name}'")]
    MissingMappingContext { type_name: String },
    #[error("no mapped entity found for type '{type_name}'")]
    UnknownEntity { type_name: String },
    #[error("[{property}] in entity {entity} does not represent a composite primary key property")]
    NotCompositeKey { property: String, entity: String },
    #[error("composite primary key property '{property}' in entity {entity} has no column type of its own")]
    CompositeKeyColumnType { property: String, entity: String },

    #[error("associations are not supported: property '{property}' in entity {entity}")]
    UnsupportedAssociation { property: String, entity: String },
}

impl MappingError {
    /// Classify the error for callers that only care about the category
    pub fn kind(&self) -> ErrorKind {
        match self {
            MappingError::NotSingleColumn { .. }
            | MappingError::MissingMappingContext { .. }
            | MappingError::UnknownEntity { .. }
            | MappingError::NotCompositeKey { .. }
            | MappingError::CompositeKeyColumnType { .. } => ErrorKind::State,
            MappingError::UnsupportedAssociation { .. } => ErrorKind::UnsupportedOperation,
            _ => ErrorKind::Configuration,
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    pub fn is_state(&self) -> bool {
        self.kind() == ErrorKind::State
    }

    /// Create an invalid definition error with context information
    ///
    /// # Example
    /// ```ignore
    /// MappingError::definition_error_with_context(
    ///     "Reading",
    ///     "While building the mapping context"
    /// )
    /// ```
    pub fn definition_error_with_context(
        subject: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        MappingError::InvalidDefinition {
            message: format!("{}\n  Context: {}", subject.into(), context.into()),
        }
    }
}
