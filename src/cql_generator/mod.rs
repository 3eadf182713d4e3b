//! CQL schema statement generation
//!
//! Renders `CREATE KEYSPACE`, `CREATE TABLE` and `CREATE INDEX` statements from
//! keyspace specifications and derived table schemas. Statements are returned
//! as strings; executing them is left to the caller.

mod keyspace;
mod table;

pub use keyspace::create_keyspace_cql;
pub use table::{create_index_cql, create_table_cql};

use crate::keyspace::KeyspaceSpec;
use crate::mapping::{MappingContext, MappingError, TableSpec};

/// Render the full schema of a mapping context
///
/// Returns the keyspace statement (if any), then one `CREATE TABLE` and its
/// `CREATE INDEX` statements per table entity, in registration order.
pub fn generate_schema_cql(
    context: &MappingContext,
    keyspace: Option<&KeyspaceSpec>,
) -> Result<Vec<String>, MappingError> {
    let mut statements = Vec::new();
    if let Some(spec) = keyspace {
        statements.push(create_keyspace_cql(spec));
    }

    let resolver = context.resolver();
    for entity in context.table_entities() {
        let table = TableSpec::from_entity(&resolver, entity)?;
        statements.push(create_table_cql(&table, keyspace)?);
        statements.extend(create_index_cql(&table, keyspace));
    }
    Ok(statements)
}
