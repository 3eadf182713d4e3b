use crate::keyspace::KeyspaceSpec;
use crate::mapping::{ClusteringOrder, MappingError, TableSpec};

fn qualified_name(table: &TableSpec, keyspace: Option<&KeyspaceSpec>) -> String {
    match keyspace {
        Some(spec) => format!("{}.{}", spec.name(), table.name),
        None => table.name.to_cql(),
    }
}

/// Render a `CREATE TABLE` statement
///
/// Partition key columns are grouped in the first PRIMARY KEY component.
/// Descending clustering columns produce a `CLUSTERING ORDER BY` clause
/// covering every clustering column.
pub fn create_table_cql(
    table: &TableSpec,
    keyspace: Option<&KeyspaceSpec>,
) -> Result<String, MappingError> {
    let partition = table.partition_key_columns();
    if partition.is_empty() {
        return Err(MappingError::MissingPartitionKey {
            entity: table.entity.clone(),
        });
    }
    let clustering = table.clustering_columns();

    let mut definitions: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("{} {}", c.name, c.column_type))
        .collect();

    let partition_names: Vec<String> = partition.iter().map(|c| c.name.to_cql()).collect();
    let mut key = format!("({})", partition_names.join(", "));
    for column in &clustering {
        key.push_str(", ");
        key.push_str(&column.name.to_cql());
    }
    definitions.push(format!("PRIMARY KEY ({})", key));

    let mut sql = format!(
        "CREATE TABLE {} ({})",
        qualified_name(table, keyspace),
        definitions.join(", ")
    );

    let descending = clustering
        .iter()
        .any(|c| c.ordering == Some(ClusteringOrder::Descending));
    if descending {
        let order: Vec<String> = clustering
            .iter()
            .map(|c| {
                format!(
                    "{} {}",
                    c.name,
                    c.ordering.unwrap_or_default().as_cql()
                )
            })
            .collect();
        sql.push_str(&format!(" WITH CLUSTERING ORDER BY ({})", order.join(", ")));
    }
    sql.push(';');

    log::debug!("Generated table statement for {}: {}", table.entity, sql);
    Ok(sql)
}

/// Render one `CREATE INDEX` statement per indexed column
pub fn create_index_cql(table: &TableSpec, keyspace: Option<&KeyspaceSpec>) -> Vec<String> {
    let target = qualified_name(table, keyspace);
    table
        .indexed_columns()
        .into_iter()
        .map(|c| format!("CREATE INDEX IF NOT EXISTS ON {} ({});", target, c.name))
        .collect()
}
