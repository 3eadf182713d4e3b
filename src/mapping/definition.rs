use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use validator::Validate;

use super::context::MappingContext;
use super::declared_type::DeclaredType;
use super::entity::MappedEntity;
use super::errors::MappingError;
use super::expression::TemplateEvaluator;
use super::property::{ColumnOverride, KeyColumn, MappedProperty, TypeOverride};
use crate::keyspace::{KeyspaceSpec, ReplicationStrategy};

/// Mapping definition documents
///
/// Entities are declared in YAML and turned into a [`MappingContext`] once at
/// startup. The structure is:
///
/// ```yaml
/// keyspace:                       # Optional keyspace specification
///   name: telemetry
///   replication_strategy: NetworkTopologyStrategy
///   data_centers: { dc1: 3, dc2: 2 }
/// variables:                      # Values for #{...} placeholders
///   env: prod
/// primary_key_classes:            # Composite key containers
///   - name: ReadingKey
///     properties:
///       - name: sensor_id
///         type: Uuid
///         primary_key: { role: partitioned }
///       - name: at
///         type: DateTime
///         primary_key: { role: clustered, ordering: descending, name: read_at }
/// entities:                       # Tables
///   - name: Reading
///     table: readings
///     properties:
///       - name: key
///         type: ReadingKey        # Refers to a primary key class
///       - name: tags
///         type: HashSet<String>
///         indexed: true
///       - name: attributes
///         type: HashMap<String, String>
///         column: { name: "attrs_#{env}" }
/// ```
///
/// # Usage
///
/// ```ignore
/// let definition = MappingDefinition::from_yaml_file("telemetry.yaml")?;
/// let context = definition.build_context()?;
/// context.validate()?;
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MappingDefinition {
    /// Keyspace the tables live in
    #[serde(default)]
    #[validate(nested)]
    pub keyspace: Option<KeyspaceDefinition>,

    /// Evaluation context for `#{...}` placeholders in column names
    #[serde(default)]
    pub variables: BTreeMap<String, String>,

    /// Composite primary key containers
    #[serde(default)]
    #[validate(nested)]
    pub primary_key_classes: Vec<EntityDefinition>,

    /// Table entities
    #[serde(default)]
    #[validate(nested)]
    pub entities: Vec<EntityDefinition>,
}

/// Keyspace definition in a mapping document
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct KeyspaceDefinition {
    #[validate(length(min = 1, message = "Keyspace name cannot be empty"))]
    pub name: String,

    #[serde(default = "default_replication_strategy")]
    pub replication_strategy: String,

    #[serde(default = "default_replication_factor")]
    #[validate(range(min = 1, max = 100, message = "Replication factor must be between 1 and 100"))]
    pub replication_factor: u32,

    /// Replicas per data center (NetworkTopologyStrategy)
    #[serde(default)]
    pub data_centers: BTreeMap<String, u32>,

    #[serde(default = "default_durable_writes")]
    pub durable_writes: bool,

    #[serde(default)]
    pub if_not_exists: bool,
}

fn default_replication_strategy() -> String {
    "SimpleStrategy".to_string()
}

fn default_replication_factor() -> u32 {
    1
}

fn default_durable_writes() -> bool {
    true
}

/// Entity (table or primary key class) definition
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EntityDefinition {
    #[validate(length(min = 1, message = "Entity name cannot be empty"))]
    pub name: String,

    /// Optional table name; defaults to the lower-cased entity name
    #[serde(default)]
    pub table: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub properties: Vec<PropertyDefinition>,
}

/// Property definition
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PropertyDefinition {
    #[validate(length(min = 1, message = "Property name cannot be empty"))]
    pub name: String,

    /// Declared Rust type, e.g. `HashMap<String, i64>`
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Property type cannot be empty"))]
    pub type_name: String,

    /// Optional: explicit CQL type, wins over the declared type
    #[serde(default)]
    pub cql_type: Option<TypeOverride>,

    /// Optional: explicit column name
    #[serde(default)]
    pub column: Option<ColumnOverride>,

    /// Optional: primary key column metadata
    #[serde(default)]
    pub primary_key: Option<KeyColumn>,

    #[serde(default)]
    pub indexed: bool,
}

impl MappingDefinition {
    /// Parse and structurally validate a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self, MappingError> {
        let definition: MappingDefinition =
            serde_yaml::from_str(content).map_err(|e| MappingError::DefinitionParse {
                error: e.to_string(),
            })?;
        definition.check()?;
        Ok(definition)
    }

    /// Load a YAML document from disk
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, MappingError> {
        let path = path.as_ref();
        log::info!("Loading mapping definition from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| MappingError::DefinitionRead {
            error: format!("{}: {}", path.display(), e),
        })?;
        MappingDefinition::from_yaml_str(&content)
    }

    /// Structural validation (non-blank names, replication factor range)
    pub fn check(&self) -> Result<(), MappingError> {
        self.validate().map_err(|e| MappingError::InvalidDefinition {
            message: e.to_string(),
        })
    }

    /// Build the mapping context
    ///
    /// Primary key classes are registered first so that table properties can
    /// refer to them by type name. Cyclic key classes are rejected here.
    pub fn build_context(&self) -> Result<MappingContext, MappingError> {
        let key_classes: HashSet<&str> = self
            .primary_key_classes
            .iter()
            .map(|d| d.name.as_str())
            .collect();

        let mut context = MappingContext::new();
        if !self.variables.is_empty() {
            context = context.with_evaluator(TemplateEvaluator::new(self.variables.clone()));
        }

        for definition in &self.primary_key_classes {
            let entity = definition.to_entity(MappedEntity::primary_key_class(&definition.name), &key_classes)?;
            context.register(entity)?;
        }
        for definition in &self.entities {
            let entity = definition.to_entity(MappedEntity::table(&definition.name), &key_classes)?;
            context.register(entity)?;
        }

        context.check_composite_cycles()?;
        log::info!(
            "Built mapping context: {} tables, {} primary key classes",
            self.entities.len(),
            self.primary_key_classes.len()
        );
        Ok(context)
    }

    /// Keyspace specification, if the document declares one
    pub fn keyspace_spec(&self) -> Result<Option<KeyspaceSpec>, MappingError> {
        self.keyspace.as_ref().map(|k| k.to_spec()).transpose()
    }
}

impl KeyspaceDefinition {
    pub fn to_spec(&self) -> Result<KeyspaceSpec, MappingError> {
        KeyspaceSpec::builder(&self.name)
            .replication_strategy(ReplicationStrategy::from(self.replication_strategy.as_str()))
            .replication_factor(self.replication_factor)
            .data_centers(self.data_centers.clone())
            .durable_writes(self.durable_writes)
            .if_not_exists(self.if_not_exists)
            .build()
    }
}

impl EntityDefinition {
    fn to_entity(
        &self,
        mut entity: MappedEntity,
        key_classes: &HashSet<&str>,
    ) -> Result<MappedEntity, MappingError> {
        if let Some(table) = &self.table {
            entity = entity.with_table_name(table);
        }
        for property in &self.properties {
            entity.add_property(property.to_property(&self.name, key_classes)?)?;
        }
        Ok(entity)
    }
}

impl PropertyDefinition {
    fn to_property(
        &self,
        owner: &str,
        key_classes: &HashSet<&str>,
    ) -> Result<MappedProperty, MappingError> {
        let declared = DeclaredType::parse_with_key_classes(&self.type_name, key_classes).map_err(|e| {
            MappingError::definition_error_with_context(
                format!("property '{}' in entity {}", self.name, owner),
                e.to_string(),
            )
        })?;

        let mut property = MappedProperty::new(owner, &self.name, declared).indexed(self.indexed);
        if let Some(type_override) = &self.cql_type {
            property = property.with_type_override(type_override.clone());
        }
        if let Some(column) = &self.column {
            property = property.with_column(column.clone());
        }
        if let Some(key) = &self.primary_key {
            property = property.with_key(key.clone());
        }
        Ok(property)
    }
}
