//! Table schema derived from a mapped entity
//!
//! Columns follow property declaration order. Composite key properties are
//! replaced by the leaf columns of their primary-key class, each carrying its
//! own type, key role and ordering.

use serde::Serialize;

use super::column_names::ColumnResolver;
use super::column_type::ColumnType;
use super::entity::MappedEntity;
use super::errors::MappingError;
use super::identifier::CqlIdentifier;
use super::property::{ClusteringOrder, KeyRole};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    pub name: CqlIdentifier,
    pub column_type: ColumnType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_role: Option<KeyRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<ClusteringOrder>,
    pub indexed: bool,
}

impl ColumnSpec {
    pub fn is_partition_key(&self) -> bool {
        self.key_role == Some(KeyRole::Partitioned)
    }

    pub fn is_clustering_key(&self) -> bool {
        self.key_role == Some(KeyRole::Clustered)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSpec {
    pub entity: String,
    pub name: CqlIdentifier,
    pub columns: Vec<ColumnSpec>,
}

impl TableSpec {
    /// Derive the table schema of an entity
    pub fn from_entity(
        resolver: &ColumnResolver<'_>,
        entity: &MappedEntity,
    ) -> Result<Self, MappingError> {
        let mut columns: Vec<ColumnSpec> = Vec::new();

        for property in entity.properties() {
            resolver.for_each_leaf(property, &mut |leaf| {
                let name = resolver.column_name(leaf)?;
                if columns.iter().any(|c| c.name.as_str() == name.as_str()) {
                    return Err(MappingError::DuplicateColumn {
                        column: name.to_cql(),
                        entity: entity.name().to_string(),
                    });
                }
                columns.push(ColumnSpec {
                    name,
                    column_type: leaf.column_type()?,
                    key_role: leaf.key_role(),
                    ordering: leaf.ordering(),
                    indexed: leaf.is_indexed(),
                });
                Ok(())
            })?;
        }

        log::debug!(
            "Derived table '{}' for entity {} with {} columns",
            entity.table_name(),
            entity.name(),
            columns.len()
        );

        Ok(TableSpec {
            entity: entity.name().to_string(),
            name: CqlIdentifier::unquoted(&entity.table_name())?,
            columns,
        })
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name.as_str() == name)
    }

    pub fn partition_key_columns(&self) -> Vec<&ColumnSpec> {
        self.columns.iter().filter(|c| c.is_partition_key()).collect()
    }

    pub fn clustering_columns(&self) -> Vec<&ColumnSpec> {
        self.columns.iter().filter(|c| c.is_clustering_key()).collect()
    }

    pub fn regular_columns(&self) -> Vec<&ColumnSpec> {
        self.columns.iter().filter(|c| c.key_role.is_none()).collect()
    }

    pub fn indexed_columns(&self) -> Vec<&ColumnSpec> {
        self.columns.iter().filter(|c| c.indexed).collect()
    }
}
