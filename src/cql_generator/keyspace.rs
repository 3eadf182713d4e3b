use crate::keyspace::{KeyspaceSpec, ReplicationStrategy};

/// Render a `CREATE KEYSPACE` statement
///
/// # Example
/// ```ignore
/// let spec = KeyspaceSpec::builder("telemetry").replication_factor(3).build()?;
/// assert_eq!(
///     create_keyspace_cql(&spec),
///     "CREATE KEYSPACE telemetry WITH replication = { 'class' : 'SimpleStrategy', 'replication_factor' : 3 } AND durable_writes = true;"
/// );
/// ```
pub fn create_keyspace_cql(spec: &KeyspaceSpec) -> String {
    let mut options = vec![format!(
        "'class' : {}",
        quote_literal(spec.replication_strategy().as_str())
    )];

    match spec.replication_strategy() {
        ReplicationStrategy::Simple => {
            options.push(format!("'replication_factor' : {}", spec.replication_factor()));
        }
        ReplicationStrategy::NetworkTopology => {}
        ReplicationStrategy::Custom(_) => {
            if spec.data_centers().is_empty() {
                options.push(format!("'replication_factor' : {}", spec.replication_factor()));
            }
        }
    }

    if *spec.replication_strategy() != ReplicationStrategy::Simple {
        for (dc, replicas) in spec.data_centers() {
            options.push(format!("{} : {}", quote_literal(dc), replicas));
        }
    }

    format!(
        "CREATE KEYSPACE {}{} WITH replication = {{ {} }} AND durable_writes = {};",
        if spec.if_not_exists() { "IF NOT EXISTS " } else { "" },
        spec.name(),
        options.join(", "),
        spec.durable_writes()
    )
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
