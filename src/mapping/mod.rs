pub mod column_names;
pub mod column_type;
pub mod context;
pub mod declared_type;
pub mod definition;
pub mod entity;
pub mod errors;
pub mod expression;
pub mod identifier;
pub mod property;
pub mod table;
pub mod type_resolver;

// Re-export commonly used types
pub use column_names::ColumnResolver;
pub use column_type::{primitive_type_for, ColumnType, NativeType, TypeName};
pub use context::{EntityLookup, MappingContext};
pub use declared_type::{DeclaredType, TypeKind};
pub use definition::MappingDefinition;
pub use entity::{EntityKind, MappedEntity};
pub use errors::{ErrorKind, MappingError};
pub use expression::{ExpressionEvaluator, TemplateEvaluator};
pub use identifier::CqlIdentifier;
pub use property::{
    ClusteringOrder, ColumnOverride, KeyColumn, KeyRole, MappedProperty, TypeOverride,
};
pub use table::{ColumnSpec, TableSpec};
