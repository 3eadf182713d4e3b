//! Unit tests for column naming, key roles and composite key flattening

#[cfg(test)]
mod column_name_tests {
    use cqlmap::mapping::{
        ClusteringOrder, ColumnOverride, ColumnResolver, DeclaredType, ErrorKind, KeyColumn,
        MappedEntity, MappedProperty, MappingContext, MappingError, TemplateEvaluator,
    };

    fn prop(name: &str, declared: DeclaredType) -> MappedProperty {
        MappedProperty::new("Sample", name, declared)
    }

    fn names(context: &MappingContext, entity: &str, property: &str) -> Vec<String> {
        context
            .get(entity)
            .unwrap()
            .property(property)
            .unwrap()
            .column_names(&context.resolver())
            .unwrap()
            .iter()
            .map(|n| n.to_cql())
            .collect()
    }

    #[test]
    fn test_default_name_is_property_name() {
        let p = prop("sensorName", DeclaredType::simple("String"));
        let name = p.column_name(&ColumnResolver::detached()).unwrap();
        assert_eq!(name.to_cql(), "sensorname");
    }

    #[test]
    fn test_key_column_name_beats_property_name() {
        let p = prop("id", DeclaredType::simple("Uuid"))
            .with_key(KeyColumn::partitioned().named("sensor_id", false));
        assert_eq!(
            p.column_name(&ColumnResolver::detached()).unwrap().to_cql(),
            "sensor_id"
        );
    }

    #[test]
    fn test_column_override_beats_key_column_name() {
        let p = prop("id", DeclaredType::simple("Uuid"))
            .with_key(KeyColumn::partitioned().named("sensor_id", false))
            .with_column(ColumnOverride::new("SensorKey", true));
        assert_eq!(
            p.column_name(&ColumnResolver::detached()).unwrap().to_cql(),
            "\"SensorKey\""
        );
    }

    #[test]
    fn test_blank_override_falls_through() {
        let p = prop("value", DeclaredType::simple("f64"))
            .with_key(KeyColumn::clustered(ClusteringOrder::Ascending).named(" ", false))
            .with_column(ColumnOverride::new("", false));
        assert_eq!(
            p.column_name(&ColumnResolver::detached()).unwrap().to_cql(),
            "value"
        );
    }

    #[test]
    fn test_dynamic_names_are_evaluated() {
        let evaluator = TemplateEvaluator::default().with_variable("region", "eu");
        let resolver = ColumnResolver::detached().with_evaluator(&evaluator);

        let overridden = prop("total", DeclaredType::simple("i64"))
            .with_column(ColumnOverride::new("total_#{region}", false));
        let keyed = prop("bucket", DeclaredType::simple("i32"))
            .with_key(KeyColumn::partitioned().named("bucket_#{region}", false));

        assert_eq!(resolver.column_name(&overridden).unwrap().to_cql(), "total_eu");
        assert_eq!(resolver.column_name(&keyed).unwrap().to_cql(), "bucket_eu");
    }

    #[test]
    fn test_closure_evaluator() {
        let upper = |text: &str| -> Result<String, MappingError> { Ok(text.to_uppercase()) };
        let resolver = ColumnResolver::detached().with_evaluator(&upper);
        let p = prop("total", DeclaredType::simple("i64"))
            .with_column(ColumnOverride::new("total", true));
        assert_eq!(resolver.column_name(&p).unwrap().to_cql(), "\"TOTAL\"");
    }

    #[test]
    fn test_key_roles_are_exclusive() {
        let partition = prop("a", DeclaredType::simple("i32")).with_key(KeyColumn::partitioned());
        let cluster = prop("b", DeclaredType::simple("i32"))
            .with_key(KeyColumn::clustered(ClusteringOrder::Descending));
        let plain = prop("c", DeclaredType::simple("i32"));

        assert!(partition.is_partition_key_column() && !partition.is_cluster_key_column());
        assert!(cluster.is_cluster_key_column() && !cluster.is_partition_key_column());
        assert!(!plain.is_partition_key_column() && !plain.is_cluster_key_column());
        assert!(!plain.is_primary_key_column());
        assert_eq!(cluster.ordering(), Some(ClusteringOrder::Descending));
        assert_eq!(plain.ordering(), None);
    }

    fn nested_context() -> MappingContext {
        let mut ctx = MappingContext::new();
        ctx.register(
            MappedEntity::primary_key_class("Inner")
                .with_property(prop("c", DeclaredType::simple("String")).with_key(KeyColumn::clustered(ClusteringOrder::Ascending)))
                .unwrap()
                .with_property(prop("d", DeclaredType::simple("i32")).with_key(KeyColumn::clustered(ClusteringOrder::Ascending)))
                .unwrap(),
        )
        .unwrap();
        ctx.register(
            MappedEntity::primary_key_class("Flat")
                .with_property(prop("a", DeclaredType::simple("Uuid")).with_key(KeyColumn::partitioned()))
                .unwrap()
                .with_property(prop("b", DeclaredType::simple("i64")).with_key(KeyColumn::clustered(ClusteringOrder::Ascending)))
                .unwrap(),
        )
        .unwrap();
        ctx.register(
            MappedEntity::primary_key_class("Outer")
                .with_property(prop("a", DeclaredType::simple("Uuid")).with_key(KeyColumn::partitioned()))
                .unwrap()
                .with_property(prop("inner", DeclaredType::composite_key("Inner")))
                .unwrap()
                .with_property(prop("b", DeclaredType::simple("i64")).with_key(KeyColumn::clustered(ClusteringOrder::Ascending)))
                .unwrap(),
        )
        .unwrap();
        ctx.register(
            MappedEntity::table("Row")
                .with_property(prop("flat", DeclaredType::composite_key("Flat")))
                .unwrap()
                .with_property(prop("outer", DeclaredType::composite_key("Outer")))
                .unwrap()
                .with_property(
                    prop("ignored", DeclaredType::composite_key("Flat"))
                        .with_column(ColumnOverride::new("should_not_apply", false)),
                )
                .unwrap(),
        )
        .unwrap();
        ctx
    }

    #[test]
    fn test_flat_composite_key() {
        assert_eq!(names(&nested_context(), "Row", "flat"), vec!["a", "b"]);
    }

    #[test]
    fn test_nested_composite_key_keeps_declared_order() {
        assert_eq!(
            names(&nested_context(), "Row", "outer"),
            vec!["a", "c", "d", "b"]
        );
    }

    #[test]
    fn test_composite_key_ignores_direct_override() {
        assert_eq!(names(&nested_context(), "Row", "ignored"), vec!["a", "b"]);
    }

    #[test]
    fn test_single_name_of_composite_key_is_state_error() {
        let ctx = nested_context();
        let p = ctx.get("Row").unwrap().property("flat").unwrap();
        let err = p.column_name(&ctx.resolver()).unwrap_err();
        assert!(matches!(err, MappingError::NotSingleColumn { count: 2, .. }));
        assert_eq!(err.kind(), ErrorKind::State);
    }

    #[test]
    fn test_composite_key_accessors() {
        let ctx = nested_context();
        let resolver = ctx.resolver();
        let outer = ctx.get("Row").unwrap().property("outer").unwrap();

        assert_eq!(outer.composite_primary_key_type(), Some("Outer"));
        assert_eq!(
            outer.composite_primary_key_entity(&resolver).unwrap().name(),
            "Outer"
        );
        let nested: Vec<&str> = outer
            .composite_primary_key_properties(&resolver)
            .unwrap()
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(nested, vec!["a", "inner", "b"]);

        let plain = prop("x", DeclaredType::simple("i32"));
        let err = plain.composite_primary_key_entity(&resolver).unwrap_err();
        assert!(matches!(err, MappingError::NotCompositeKey { .. }));
    }

    #[test]
    fn test_composite_key_needs_lookup() {
        let p = prop("key", DeclaredType::composite_key("Flat"));
        let err = p.column_names(&ColumnResolver::detached()).unwrap_err();
        assert!(matches!(err, MappingError::MissingMappingContext { .. }));
        assert!(err.is_state());
    }

    #[test]
    fn test_association_is_unsupported() {
        let p = prop("owner", DeclaredType::simple("String"));
        assert!(!p.is_association());
        assert_eq!(
            p.association().unwrap_err().kind(),
            ErrorKind::UnsupportedOperation
        );
    }
}
