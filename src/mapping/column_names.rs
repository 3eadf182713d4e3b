//! Column name resolution and composite key flattening
//!
//! Precedence for a non-composite property:
//! 1. explicit column override (if non-blank)
//! 2. name declared on the primary key column metadata (if non-blank)
//! 3. the property's own name, unquoted
//!
//! Overrides are passed through the expression evaluator when one is
//! configured. Composite key properties ignore overrides entirely and resolve
//! to the flattened leaf columns of their primary-key class, in declaration
//! order.

use super::context::EntityLookup;
use super::entity::MappedEntity;
use super::errors::MappingError;
use super::expression::ExpressionEvaluator;
use super::identifier::CqlIdentifier;
use super::property::MappedProperty;

/// Resolves column names with the capabilities of a mapping context
///
/// A detached resolver (no entity lookup, no evaluator) resolves plain
/// properties with literal overrides and refuses composite keys.
#[derive(Clone, Copy, Default)]
pub struct ColumnResolver<'a> {
    entities: Option<&'a dyn EntityLookup>,
    evaluator: Option<&'a dyn ExpressionEvaluator>,
}

impl<'a> ColumnResolver<'a> {
    pub fn detached() -> Self {
        ColumnResolver::default()
    }

    pub fn with_entities(mut self, entities: &'a dyn EntityLookup) -> Self {
        self.entities = Some(entities);
        self
    }

    pub fn with_evaluator(mut self, evaluator: &'a dyn ExpressionEvaluator) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// All persisted column names of a property
    pub fn column_names(&self, property: &MappedProperty) -> Result<Vec<CqlIdentifier>, MappingError> {
        let mut names = Vec::new();
        self.for_each_leaf(property, &mut |leaf| {
            names.push(self.leaf_column_name(leaf)?);
            Ok(())
        })?;
        Ok(names)
    }

    /// The single column name of a property
    pub fn column_name(&self, property: &MappedProperty) -> Result<CqlIdentifier, MappingError> {
        let mut names = self.column_names(property)?;
        if names.len() != 1 {
            return Err(MappingError::NotSingleColumn {
                property: property.name().to_string(),
                entity: property.owner().to_string(),
                count: names.len(),
            });
        }
        Ok(names.remove(0))
    }

    /// Nested entity of a composite key property
    pub fn composite_entity(&self, property: &MappedProperty) -> Result<&'a MappedEntity, MappingError> {
        let type_name =
            property
                .composite_primary_key_type()
                .ok_or_else(|| MappingError::NotCompositeKey {
                    property: property.name().to_string(),
                    entity: property.owner().to_string(),
                })?;
        self.lookup(type_name)
    }

    /// Visit every leaf property a property maps to, in column order
    ///
    /// A plain property is its own single leaf. A composite key property
    /// yields the leaves of its primary-key class, recursing into nested
    /// composite keys. Re-entering a key class that is already being expanded
    /// fails with [`MappingError::CompositeKeyCycle`].
    pub fn for_each_leaf(
        &self,
        property: &MappedProperty,
        visit: &mut dyn FnMut(&MappedProperty) -> Result<(), MappingError>,
    ) -> Result<(), MappingError> {
        let Some(type_name) = property.composite_primary_key_type() else {
            return visit(property);
        };

        let mut chain = vec![type_name.to_string()];
        let entity = self.lookup(type_name)?;
        self.flatten(entity, &mut chain, visit)
    }

    fn flatten(
        &self,
        entity: &'a MappedEntity,
        chain: &mut Vec<String>,
        visit: &mut dyn FnMut(&MappedProperty) -> Result<(), MappingError>,
    ) -> Result<(), MappingError> {
        for nested in entity.properties() {
            match nested.composite_primary_key_type() {
                Some(type_name) => {
                    if chain.iter().any(|t| t == type_name) {
                        chain.push(type_name.to_string());
                        return Err(MappingError::CompositeKeyCycle {
                            property: nested.name().to_string(),
                            entity: entity.name().to_string(),
                            chain: chain.join(" -> "),
                        });
                    }
                    chain.push(type_name.to_string());
                    let inner = self.lookup(type_name)?;
                    self.flatten(inner, chain, visit)?;
                    chain.pop();
                }
                None => visit(nested)?,
            }
        }
        Ok(())
    }

    fn lookup(&self, type_name: &str) -> Result<&'a MappedEntity, MappingError> {
        let entities = self
            .entities
            .ok_or_else(|| MappingError::MissingMappingContext {
                type_name: type_name.to_string(),
            })?;
        entities
            .entity(type_name)
            .ok_or_else(|| MappingError::UnknownEntity {
                type_name: type_name.to_string(),
            })
    }

    fn leaf_column_name(&self, property: &MappedProperty) -> Result<CqlIdentifier, MappingError> {
        if let Some(column) = property.column_override() {
            if !column.name.trim().is_empty() {
                return self.identifier(&column.name, column.force_quote);
            }
        }

        if let Some(key) = property.key_column() {
            if let Some(name) = key.name.as_deref().filter(|n| !n.trim().is_empty()) {
                return self.identifier(name, key.force_quote);
            }
        }

        CqlIdentifier::unquoted(property.name())
    }

    fn identifier(&self, raw: &str, force_quote: bool) -> Result<CqlIdentifier, MappingError> {
        match self.evaluator {
            Some(evaluator) => CqlIdentifier::new(&evaluator.evaluate(raw)?, force_quote),
            None => CqlIdentifier::new(raw, force_quote),
        }
    }
}
