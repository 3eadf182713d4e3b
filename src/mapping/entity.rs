use super::errors::MappingError;
use super::property::MappedProperty;

/// What a mapped entity stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Persisted as its own table
    Table,
    /// Composite primary key container, flattened into its owner's table
    PrimaryKeyClass,
}

/// A mapped type with its properties in declaration order
#[derive(Debug, Clone)]
pub struct MappedEntity {
    name: String,
    kind: EntityKind,
    table: Option<String>,
    properties: Vec<MappedProperty>,
}

impl MappedEntity {
    pub fn table(name: impl Into<String>) -> Self {
        MappedEntity {
            name: name.into(),
            kind: EntityKind::Table,
            table: None,
            properties: Vec::new(),
        }
    }

    pub fn primary_key_class(name: impl Into<String>) -> Self {
        MappedEntity {
            name: name.into(),
            kind: EntityKind::PrimaryKeyClass,
            table: None,
            properties: Vec::new(),
        }
    }

    /// Override the table name (defaults to the lower-cased entity name)
    pub fn with_table_name(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Append a property; its owner back-reference is set to this entity
    pub fn add_property(&mut self, mut property: MappedProperty) -> Result<(), MappingError> {
        if self.property(property.name()).is_some() {
            return Err(MappingError::DuplicateProperty {
                property: property.name().to_string(),
                entity: self.name.clone(),
            });
        }
        property.set_owner(&self.name);
        self.properties.push(property);
        Ok(())
    }

    /// Builder-style [`add_property`](Self::add_property)
    pub fn with_property(mut self, property: MappedProperty) -> Result<Self, MappingError> {
        self.add_property(property)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn is_primary_key_class(&self) -> bool {
        self.kind == EntityKind::PrimaryKeyClass
    }

    pub fn table_name(&self) -> String {
        self.table
            .clone()
            .unwrap_or_else(|| self.name.to_lowercase())
    }

    pub fn properties(&self) -> &[MappedProperty] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&MappedProperty> {
        self.properties.iter().find(|p| p.name() == name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Properties taking part in the primary key, directly or as a composite
    pub fn composite_primary_key_properties(&self) -> Vec<&MappedProperty> {
        self.properties
            .iter()
            .filter(|p| p.is_primary_key_column() || p.is_composite_primary_key())
            .collect()
    }

    /// The composite primary key property, if the entity has one
    pub fn id_property(&self) -> Option<&MappedProperty> {
        self.properties.iter().find(|p| p.is_composite_primary_key())
    }

    pub fn partition_key_properties(&self) -> Vec<&MappedProperty> {
        self.properties
            .iter()
            .filter(|p| p.is_partition_key_column())
            .collect()
    }

    pub fn cluster_key_properties(&self) -> Vec<&MappedProperty> {
        self.properties
            .iter()
            .filter(|p| p.is_cluster_key_column())
            .collect()
    }
}
