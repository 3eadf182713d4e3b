use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::column_names::ColumnResolver;
use super::column_type::{ColumnType, TypeName};
use super::declared_type::DeclaredType;
use super::entity::MappedEntity;
use super::errors::MappingError;
use super::identifier::CqlIdentifier;
use super::type_resolver;

/// Role of a primary key column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyRole {
    /// Determines data placement
    Partitioned,
    /// Determines on-disk ordering within a partition
    Clustered,
}

/// Clustering order of a key column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusteringOrder {
    #[default]
    Ascending,
    Descending,
}

impl ClusteringOrder {
    pub fn as_cql(&self) -> &'static str {
        match self {
            ClusteringOrder::Ascending => "ASC",
            ClusteringOrder::Descending => "DESC",
        }
    }
}

/// Primary key column metadata declared on a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyColumn {
    pub role: KeyRole,
    /// Optional column name; may contain `#{...}` placeholders
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ordering: ClusteringOrder,
    #[serde(default)]
    pub force_quote: bool,
}

impl KeyColumn {
    pub fn partitioned() -> Self {
        KeyColumn {
            role: KeyRole::Partitioned,
            name: None,
            ordering: ClusteringOrder::default(),
            force_quote: false,
        }
    }

    pub fn clustered(ordering: ClusteringOrder) -> Self {
        KeyColumn {
            role: KeyRole::Clustered,
            name: None,
            ordering,
            force_quote: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>, force_quote: bool) -> Self {
        self.name = Some(name.into());
        self.force_quote = force_quote;
        self
    }
}

/// Explicit column name override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOverride {
    /// Column name; may contain `#{...}` placeholders
    pub name: String,
    #[serde(default)]
    pub force_quote: bool,
}

impl ColumnOverride {
    pub fn new(name: impl Into<String>, force_quote: bool) -> Self {
        ColumnOverride {
            name: name.into(),
            force_quote,
        }
    }
}

/// Explicit CQL type override
///
/// ```yaml
/// cql_type:
///   type: map
///   type_arguments: [text, bigint]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeOverride {
    #[serde(rename = "type")]
    pub type_name: TypeName,
    #[serde(default)]
    pub type_arguments: Vec<TypeName>,
}

impl TypeOverride {
    pub fn new(type_name: impl Into<TypeName>, type_arguments: Vec<TypeName>) -> Self {
        TypeOverride {
            type_name: type_name.into(),
            type_arguments,
        }
    }
}

/// One mapped property of an entity
///
/// Built once while the mapping context is assembled and immutable
/// afterwards. The resolved column type is memoized on first use.
#[derive(Debug, Clone)]
pub struct MappedProperty {
    name: String,
    owner: String,
    declared_type: DeclaredType,
    type_override: Option<TypeOverride>,
    column: Option<ColumnOverride>,
    key: Option<KeyColumn>,
    indexed: bool,
    column_type: OnceLock<Result<ColumnType, MappingError>>,
}

impl MappedProperty {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, declared_type: DeclaredType) -> Self {
        MappedProperty {
            name: name.into(),
            owner: owner.into(),
            declared_type,
            type_override: None,
            column: None,
            key: None,
            indexed: false,
            column_type: OnceLock::new(),
        }
    }

    pub fn with_type_override(mut self, type_override: TypeOverride) -> Self {
        self.type_override = Some(type_override);
        self.column_type = OnceLock::new();
        self
    }

    pub fn with_column(mut self, column: ColumnOverride) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_key(mut self, key: KeyColumn) -> Self {
        self.key = Some(key);
        self
    }

    pub fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    pub(crate) fn set_owner(&mut self, owner: &str) {
        self.owner = owner.to_string();
        self.column_type = OnceLock::new();
    }

    /// Declared property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the owning entity
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn declared_type(&self) -> &DeclaredType {
        &self.declared_type
    }

    pub fn type_override(&self) -> Option<&TypeOverride> {
        self.type_override.as_ref()
    }

    pub fn column_override(&self) -> Option<&ColumnOverride> {
        self.column.as_ref()
    }

    pub fn key_column(&self) -> Option<&KeyColumn> {
        self.key.as_ref()
    }

    // ===== Role predicates =====

    pub fn is_partition_key_column(&self) -> bool {
        matches!(&self.key, Some(k) if k.role == KeyRole::Partitioned)
    }

    pub fn is_cluster_key_column(&self) -> bool {
        matches!(&self.key, Some(k) if k.role == KeyRole::Clustered)
    }

    pub fn is_primary_key_column(&self) -> bool {
        self.key.is_some()
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    pub fn is_composite_primary_key(&self) -> bool {
        self.declared_type.is_composite_key()
    }

    pub fn key_role(&self) -> Option<KeyRole> {
        self.key.as_ref().map(|k| k.role)
    }

    /// Declared ordering; only key columns have one
    pub fn ordering(&self) -> Option<ClusteringOrder> {
        self.key.as_ref().map(|k| k.ordering)
    }

    /// Type name of the primary-key class, for composite key properties
    pub fn composite_primary_key_type(&self) -> Option<&str> {
        if self.is_composite_primary_key() {
            Some(self.declared_type.name())
        } else {
            None
        }
    }

    // ===== Resolution =====

    /// Resolved CQL column type (memoized)
    pub fn column_type(&self) -> Result<ColumnType, MappingError> {
        self.column_type
            .get_or_init(|| type_resolver::resolve_column_type(self))
            .clone()
    }

    pub fn column_names(&self, resolver: &ColumnResolver<'_>) -> Result<Vec<CqlIdentifier>, MappingError> {
        resolver.column_names(self)
    }

    pub fn column_name(&self, resolver: &ColumnResolver<'_>) -> Result<CqlIdentifier, MappingError> {
        resolver.column_name(self)
    }

    pub fn composite_primary_key_entity<'a>(
        &self,
        resolver: &ColumnResolver<'a>,
    ) -> Result<&'a MappedEntity, MappingError> {
        resolver.composite_entity(self)
    }

    /// Key properties of the nested primary-key class
    pub fn composite_primary_key_properties<'a>(
        &self,
        resolver: &ColumnResolver<'a>,
    ) -> Result<Vec<&'a MappedProperty>, MappingError> {
        Ok(self
            .composite_primary_key_entity(resolver)?
            .composite_primary_key_properties())
    }

    /// Column-family tables do not model associations between entities
    pub fn is_association(&self) -> bool {
        false
    }

    pub fn association(&self) -> Result<(), MappingError> {
        Err(MappingError::UnsupportedAssociation {
            property: self.name.clone(),
            entity: self.owner.clone(),
        })
    }
}
