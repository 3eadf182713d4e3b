//! Mapping context
//!
//! Owns every mapped entity (tables and primary-key classes), provides the
//! entity lookup used to flatten composite keys, and carries the optional
//! expression evaluator for dynamic column names.
//!
//! The context is assembled once at startup and is read-only afterwards, so it
//! can be shared between threads behind an `Arc`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::column_names::ColumnResolver;
use super::entity::MappedEntity;
use super::errors::MappingError;
use super::expression::ExpressionEvaluator;

/// Lookup from a type name to its mapped entity
pub trait EntityLookup {
    fn entity(&self, type_name: &str) -> Option<&MappedEntity>;
}

impl EntityLookup for HashMap<String, MappedEntity> {
    fn entity(&self, type_name: &str) -> Option<&MappedEntity> {
        self.get(type_name)
    }
}

#[derive(Default)]
pub struct MappingContext {
    entities: Vec<MappedEntity>,
    index: HashMap<String, usize>,
    evaluator: Option<Arc<dyn ExpressionEvaluator>>,
}

impl std::fmt::Debug for MappingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingContext")
            .field("entities", &self.entities)
            .field("has_evaluator", &self.evaluator.is_some())
            .finish()
    }
}

impl MappingContext {
    pub fn new() -> Self {
        MappingContext::default()
    }

    pub fn with_evaluator(mut self, evaluator: impl ExpressionEvaluator + 'static) -> Self {
        self.evaluator = Some(Arc::new(evaluator));
        self
    }

    pub fn evaluator(&self) -> Option<&dyn ExpressionEvaluator> {
        self.evaluator.as_deref()
    }

    /// Register an entity; names must be unique across tables and key classes
    pub fn register(&mut self, entity: MappedEntity) -> Result<(), MappingError> {
        if self.index.contains_key(entity.name()) {
            return Err(MappingError::DuplicateEntity {
                entity: entity.name().to_string(),
            });
        }
        log::debug!(
            "Registering {:?} entity '{}' with {} properties",
            entity.kind(),
            entity.name(),
            entity.len()
        );
        self.index.insert(entity.name().to_string(), self.entities.len());
        self.entities.push(entity);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&MappedEntity> {
        self.index.get(name).map(|&i| &self.entities[i])
    }

    /// All entities in registration order
    pub fn entities(&self) -> &[MappedEntity] {
        &self.entities
    }

    /// Entities persisted as tables, in registration order
    pub fn table_entities(&self) -> impl Iterator<Item = &MappedEntity> {
        self.entities.iter().filter(|e| !e.is_primary_key_class())
    }

    /// Resolver wired with this context's entity lookup and evaluator
    pub fn resolver(&self) -> ColumnResolver<'_> {
        let resolver = ColumnResolver::detached().with_entities(self);
        match self.evaluator() {
            Some(evaluator) => resolver.with_evaluator(evaluator),
            None => resolver,
        }
    }

    /// Reject primary-key classes that contain themselves, directly or
    /// transitively
    pub fn check_composite_cycles(&self) -> Result<(), MappingError> {
        let resolver = ColumnResolver::detached().with_entities(self);
        for entity in &self.entities {
            for property in entity.properties() {
                if property.is_composite_primary_key() {
                    resolver.for_each_leaf(property, &mut |_| Ok(()))?;
                }
            }
        }
        Ok(())
    }

    /// Eagerly resolve every property of every entity
    ///
    /// Collects all failures instead of stopping at the first so that every
    /// mapping defect is reported at startup. Table entities are also checked
    /// for column names mapped more than once.
    pub fn validate(&self) -> Result<(), Vec<MappingError>> {
        let resolver = self.resolver();
        let mut errors = Vec::new();

        for entity in &self.entities {
            let mut seen: HashSet<String> = HashSet::new();

            for property in entity.properties() {
                match resolver.column_names(property) {
                    Ok(names) if !entity.is_primary_key_class() => {
                        for name in names {
                            if !seen.insert(name.as_str().to_string()) {
                                errors.push(MappingError::DuplicateColumn {
                                    column: name.to_cql(),
                                    entity: entity.name().to_string(),
                                });
                            }
                        }
                    }
                    Ok(_) => {}
                    Err(e) => errors.push(e),
                }

                if property.is_composite_primary_key() {
                    continue;
                }
                match property.column_type() {
                    Ok(column_type) => {
                        if property.is_primary_key_column() && column_type.is_collection() {
                            errors.push(MappingError::CollectionKeyColumn {
                                property: property.name().to_string(),
                                column_type: column_type.to_cql(),
                                entity: entity.name().to_string(),
                            });
                        }
                    }
                    Err(e) => errors.push(e),
                }
            }
        }

        if errors.is_empty() {
            log::info!("Validated {} mapped entities", self.entities.len());
            Ok(())
        } else {
            for e in &errors {
                log::warn!("Mapping validation failed: {}", e);
            }
            Err(errors)
        }
    }
}

impl EntityLookup for MappingContext {
    fn entity(&self, type_name: &str) -> Option<&MappedEntity> {
        self.get(type_name)
    }
}
