//! cqlmap - Object-to-schema mapping for CQL column-family databases
//!
//! This crate derives table and keyspace schema from declared entity definitions:
//! - Property type resolution onto CQL native and collection types
//! - Column naming with overrides, quoting and placeholder evaluation
//! - Composite primary key flattening
//! - Keyspace specifications and CQL schema statements

pub mod config;
pub mod cql_generator;
pub mod keyspace;
pub mod mapping;

pub use keyspace::{KeyspaceSpec, KeyspaceSpecBuilder, ReplicationStrategy};
pub use mapping::{
    ColumnResolver, ColumnType, MappedEntity, MappedProperty, MappingContext, MappingDefinition,
    MappingError,
};
