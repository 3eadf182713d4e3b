//! Integration tests for CQL schema generation from mapping definitions

#[cfg(test)]
mod schema_generation_tests {
    use std::path::PathBuf;

    use cqlmap::cql_generator::generate_schema_cql;
    use cqlmap::mapping::{MappingContext, MappingDefinition, MappingError, TableSpec};
    use cqlmap::KeyspaceSpec;

    fn load_bundled() -> (MappingContext, Option<KeyspaceSpec>) {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("schemas/sensor_readings.yaml");
        let definition = MappingDefinition::from_yaml_file(path).unwrap();
        (
            definition.build_context().unwrap(),
            definition.keyspace_spec().unwrap(),
        )
    }

    #[test]
    fn test_full_schema_script() {
        let (context, keyspace) = load_bundled();
        let statements = generate_schema_cql(&context, keyspace.as_ref()).unwrap();

        assert_eq!(
            statements,
            vec![
                "CREATE KEYSPACE IF NOT EXISTS telemetry WITH replication = { 'class' : 'NetworkTopologyStrategy', 'dc1' : 3, 'dc2' : 2 } AND durable_writes = true;",
                "CREATE TABLE telemetry.readings (sensor_id uuid, day date, read_at timestamp, value double, unit text, tags set<text>, attrs_prod map<text, text>, raw blob, PRIMARY KEY ((sensor_id, day), read_at)) WITH CLUSTERING ORDER BY (read_at DESC);",
                "CREATE INDEX IF NOT EXISTS ON telemetry.readings (tags);",
                "CREATE TABLE telemetry.sensors (id uuid, \"Label\" text, location inet, PRIMARY KEY ((id)));",
            ]
        );
    }

    #[test]
    fn test_schema_without_keyspace() {
        let (context, _) = load_bundled();
        let statements = generate_schema_cql(&context, None).unwrap();
        assert_eq!(statements.len(), 3);
        assert!(statements[0].starts_with("CREATE TABLE readings ("));
    }

    #[test]
    fn test_table_spec_serializes_to_json() {
        let (context, _) = load_bundled();
        let table =
            TableSpec::from_entity(&context.resolver(), context.get("Sensor").unwrap()).unwrap();
        let json = serde_json::to_value(&table).unwrap();

        assert_eq!(json["entity"], "Sensor");
        let columns = json["columns"].as_array().unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0]["column_type"], "uuid");
        assert_eq!(columns[0]["key_role"], "partitioned");
        assert!(columns[2].get("key_role").is_none());
    }

    #[test]
    fn test_table_without_partition_key() {
        let definition = MappingDefinition::from_yaml_str(
            r#"
entities:
  - name: Loose
    properties:
      - name: value
        type: i32
"#,
        )
        .unwrap();
        let context = definition.build_context().unwrap();
        let err = generate_schema_cql(&context, None).unwrap_err();
        assert!(matches!(err, MappingError::MissingPartitionKey { .. }));
    }
}
