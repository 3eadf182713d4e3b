//! Unit tests for property type resolution
//!
//! Covers the primitive table, collection arity and element rules, and the
//! precedence of explicit type overrides.

#[cfg(test)]
mod type_resolution_tests {
    use cqlmap::mapping::{
        primitive_type_for, ColumnType, DeclaredType, ErrorKind, MappedProperty, MappingError,
        NativeType, TypeName, TypeOverride,
    };
    use test_case::test_case;

    fn property(declared: DeclaredType) -> MappedProperty {
        MappedProperty::new("Sample", "field", declared)
    }

    #[test_case("String", NativeType::Text; "string")]
    #[test_case("i32", NativeType::Int; "int")]
    #[test_case("i64", NativeType::Bigint; "bigint")]
    #[test_case("f32", NativeType::Float; "float")]
    #[test_case("bool", NativeType::Boolean; "boolean")]
    #[test_case("uuid::Uuid", NativeType::Uuid; "qualified uuid")]
    #[test_case("chrono::DateTime", NativeType::Timestamp; "timestamp")]
    #[test_case("std::net::IpAddr", NativeType::Inet; "inet")]
    fn test_primitive_table_is_exact(raw: &str, expected: NativeType) {
        assert_eq!(primitive_type_for(raw), Some(expected));
        let p = property(DeclaredType::simple(raw));
        assert_eq!(p.column_type().unwrap(), ColumnType::Primitive(expected));
    }

    #[test_case("GeoPoint"; "domain type")]
    #[test_case("Sensor"; "entity type")]
    #[test_case("Vec2"; "name close to a container")]
    fn test_unknown_type_is_configuration_error(raw: &str) {
        let err = property(DeclaredType::simple(raw)).column_type().unwrap_err();
        assert!(matches!(err, MappingError::UnknownType { .. }));
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains(raw));
        assert!(err.to_string().contains("Sample"));
    }

    #[test]
    fn test_map_of_primitives() {
        let p = property(DeclaredType::parse("HashMap<String, i64>").unwrap());
        assert_eq!(
            p.column_type().unwrap(),
            ColumnType::Map(NativeType::Text, NativeType::Bigint)
        );
    }

    #[test_case(vec![TypeName::from(NativeType::Text)]; "one argument")]
    #[test_case(vec![
        TypeName::from(NativeType::Text),
        TypeName::from(NativeType::Int),
        TypeName::from(NativeType::Int),
    ]; "three arguments")]
    fn test_map_override_arity(args: Vec<TypeName>) {
        let found = args.len();
        let p = property(DeclaredType::simple("String"))
            .with_type_override(TypeOverride::new(TypeName::Map, args));
        match p.column_type().unwrap_err() {
            MappingError::TypeArgumentCount {
                expected, found: f, ..
            } => {
                assert_eq!(expected, 2);
                assert_eq!(f, found);
            }
            other => panic!("expected TypeArgumentCount, got {other:?}"),
        }
    }

    #[test]
    fn test_list_and_set_are_distinct() {
        let list = property(DeclaredType::parse("Vec<Uuid>").unwrap());
        let set = property(DeclaredType::parse("BTreeSet<Uuid>").unwrap());
        assert_eq!(list.column_type().unwrap(), ColumnType::List(NativeType::Uuid));
        assert_eq!(set.column_type().unwrap(), ColumnType::Set(NativeType::Uuid));
        assert_ne!(list.column_type().unwrap(), set.column_type().unwrap());
    }

    #[test]
    fn test_nested_collection_rejected() {
        let p = property(DeclaredType::parse("Vec<Vec<String>>").unwrap());
        let err = p.column_type().unwrap_err();
        assert!(matches!(err, MappingError::NonPrimitiveElement { .. }));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_override_wins_over_declared_type() {
        let p = property(DeclaredType::parse("Vec<String>").unwrap())
            .with_type_override(TypeOverride::new(NativeType::Blob, vec![]));
        assert_eq!(p.column_type().unwrap(), ColumnType::Primitive(NativeType::Blob));
    }

    #[test]
    fn test_optional_type_resolves_inner() {
        let p = property(DeclaredType::parse("Option<Decimal>").unwrap());
        assert_eq!(
            p.column_type().unwrap(),
            ColumnType::Primitive(NativeType::Decimal)
        );
    }

    #[test]
    fn test_cql_rendering() {
        assert_eq!(
            ColumnType::Map(NativeType::Text, NativeType::Bigint).to_cql(),
            "map<text, bigint>"
        );
        assert_eq!(ColumnType::Set(NativeType::Uuid).to_string(), "set<uuid>");
    }
}
