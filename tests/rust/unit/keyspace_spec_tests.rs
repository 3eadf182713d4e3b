//! Unit tests for keyspace specifications and their CQL rendering

#[cfg(test)]
mod keyspace_spec_tests {
    use std::collections::BTreeMap;

    use cqlmap::cql_generator::create_keyspace_cql;
    use cqlmap::{KeyspaceSpec, MappingError, ReplicationStrategy};

    fn two_data_centers() -> KeyspaceSpec {
        KeyspaceSpec::builder("telemetry")
            .replication_strategy(ReplicationStrategy::NetworkTopology)
            .data_center("dc1", 3)
            .data_center("dc2", 2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_data_center_view_matches_builder() {
        let spec = two_data_centers();
        let expected: BTreeMap<String, u32> =
            [("dc1".to_string(), 3), ("dc2".to_string(), 2)].into_iter().collect();
        assert_eq!(spec.data_centers(), &expected);
    }

    #[test]
    fn test_caller_copies_do_not_affect_spec() {
        let spec = two_data_centers();
        let mut copy = spec.data_centers().clone();
        copy.clear();
        assert_eq!(spec.data_centers().len(), 2);

        let cloned = spec.clone();
        assert_eq!(cloned, spec);
    }

    #[test]
    fn test_builder_is_reusable_through_clone() {
        let builder = KeyspaceSpec::builder("ks").replication_factor(2);
        let first = builder.clone().build().unwrap();
        let second = builder.durable_writes(false).build().unwrap();
        assert!(first.durable_writes());
        assert!(!second.durable_writes());
        assert_eq!(first.replication_factor(), second.replication_factor());
    }

    #[test]
    fn test_invalid_keyspace_is_configuration_error() {
        let err = KeyspaceSpec::builder("ks")
            .replication_factor(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, MappingError::InvalidKeyspace { .. }));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_keyspace_name_normalized() {
        let spec = KeyspaceSpec::builder("Telemetry").build().unwrap();
        assert_eq!(spec.name().to_cql(), "telemetry");
    }

    #[test]
    fn test_keyspace_statement() {
        assert_eq!(
            create_keyspace_cql(&two_data_centers()),
            "CREATE KEYSPACE telemetry WITH replication = { 'class' : 'NetworkTopologyStrategy', 'dc1' : 3, 'dc2' : 2 } AND durable_writes = true;"
        );
    }
}
