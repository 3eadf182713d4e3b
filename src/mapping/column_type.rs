//! CQL column type system
//!
//! This module provides the native CQL types a mapped property can resolve to,
//! the collection-aware [`ColumnType`] produced by type resolution, and the
//! static table that maps Rust type names onto native CQL types.
//!
//! # Supported Rust Types
//!
//! | Rust type                                   | CQL type    |
//! |---------------------------------------------|-------------|
//! | `String`, `str`                             | `text`      |
//! | `i8` / `i16` / `i32` / `i64`                | `tinyint` / `smallint` / `int` / `bigint` |
//! | `f32` / `f64`                               | `float` / `double` |
//! | `bool`                                      | `boolean`   |
//! | `Uuid`                                      | `uuid`      |
//! | `Decimal`, `BigDecimal`                     | `decimal`   |
//! | `BigInt`, `BigInteger`                      | `varint`    |
//! | `DateTime`, `NaiveDateTime`, `SystemTime`   | `timestamp` |
//! | `NaiveDate` / `NaiveTime`                   | `date` / `time` |
//! | `IpAddr`, `Ipv4Addr`, `Ipv6Addr`            | `inet`      |
//! | `Bytes`, `ByteBuffer`                       | `blob`      |
//!
//! Collections are never part of the table: `Vec<T>`, `HashSet<T>` and
//! `HashMap<K, V>` are resolved structurally by the type resolver.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Native (non-collection) CQL type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeType {
    Ascii,
    Bigint,
    Blob,
    Boolean,
    Counter,
    Date,
    Decimal,
    Double,
    Float,
    Inet,
    Int,
    Smallint,
    Text,
    Time,
    Timestamp,
    Timeuuid,
    Tinyint,
    Uuid,
    Varchar,
    Varint,
}

impl NativeType {
    /// Get the CQL type name
    pub fn as_str(&self) -> &'static str {
        match self {
            NativeType::Ascii => "ascii",
            NativeType::Bigint => "bigint",
            NativeType::Blob => "blob",
            NativeType::Boolean => "boolean",
            NativeType::Counter => "counter",
            NativeType::Date => "date",
            NativeType::Decimal => "decimal",
            NativeType::Double => "double",
            NativeType::Float => "float",
            NativeType::Inet => "inet",
            NativeType::Int => "int",
            NativeType::Smallint => "smallint",
            NativeType::Text => "text",
            NativeType::Time => "time",
            NativeType::Timestamp => "timestamp",
            NativeType::Timeuuid => "timeuuid",
            NativeType::Tinyint => "tinyint",
            NativeType::Uuid => "uuid",
            NativeType::Varchar => "varchar",
            NativeType::Varint => "varint",
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NativeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ascii" => Ok(NativeType::Ascii),
            "bigint" => Ok(NativeType::Bigint),
            "blob" => Ok(NativeType::Blob),
            "boolean" => Ok(NativeType::Boolean),
            "counter" => Ok(NativeType::Counter),
            "date" => Ok(NativeType::Date),
            "decimal" => Ok(NativeType::Decimal),
            "double" => Ok(NativeType::Double),
            "float" => Ok(NativeType::Float),
            "inet" => Ok(NativeType::Inet),
            "int" => Ok(NativeType::Int),
            "smallint" => Ok(NativeType::Smallint),
            "text" => Ok(NativeType::Text),
            "time" => Ok(NativeType::Time),
            "timestamp" => Ok(NativeType::Timestamp),
            "timeuuid" => Ok(NativeType::Timeuuid),
            "tinyint" => Ok(NativeType::Tinyint),
            "uuid" => Ok(NativeType::Uuid),
            "varchar" => Ok(NativeType::Varchar),
            "varint" => Ok(NativeType::Varint),
            _ => Err(format!("Unknown CQL type: '{}'", s)),
        }
    }
}

/// CQL type name as written in an explicit type override
///
/// Unlike [`NativeType`] this includes the collection kinds, because an
/// override may name `map`, `list` or `set` together with its type arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeName {
    Native(NativeType),
    List,
    Set,
    Map,
}

impl TypeName {
    pub fn is_collection(&self) -> bool {
        !matches!(self, TypeName::Native(_))
    }

    /// Number of type arguments a collection kind requires
    pub fn expected_type_arguments(&self) -> usize {
        match self {
            TypeName::Native(_) => 0,
            TypeName::List | TypeName::Set => 1,
            TypeName::Map => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::Native(native) => native.as_str(),
            TypeName::List => "list",
            TypeName::Set => "set",
            TypeName::Map => "map",
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TypeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "list" => Ok(TypeName::List),
            "set" => Ok(TypeName::Set),
            "map" => Ok(TypeName::Map),
            other => other.parse::<NativeType>().map(TypeName::Native),
        }
    }
}

impl TryFrom<String> for TypeName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeName> for String {
    fn from(value: TypeName) -> Self {
        value.as_str().to_string()
    }
}

impl From<NativeType> for TypeName {
    fn from(value: NativeType) -> Self {
        TypeName::Native(value)
    }
}

/// Resolved column type of a mapped property
///
/// Element, key and value types are always native, so a collection of
/// collections cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Primitive(NativeType),
    List(NativeType),
    Set(NativeType),
    Map(NativeType, NativeType),
}

impl ColumnType {
    pub fn is_collection(&self) -> bool {
        !matches!(self, ColumnType::Primitive(_))
    }

    /// Render the type as it appears in CQL DDL, e.g. `map<text, int>`
    pub fn to_cql(&self) -> String {
        match self {
            ColumnType::Primitive(native) => native.to_string(),
            ColumnType::List(elem) => format!("list<{}>", elem),
            ColumnType::Set(elem) => format!("set<{}>", elem),
            ColumnType::Map(key, value) => format!("map<{}, {}>", key, value),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cql())
    }
}

impl Serialize for ColumnType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Look up the native CQL type for a Rust type name
///
/// Only the last path segment is significant, so `uuid::Uuid` and `Uuid`
/// resolve identically.
///
/// # Example
///
/// ```ignore
/// assert_eq!(primitive_type_for("i64"), Some(NativeType::Bigint));
/// assert_eq!(primitive_type_for("std::string::String"), Some(NativeType::Text));
/// assert_eq!(primitive_type_for("GeoPoint"), None);
/// ```
pub fn primitive_type_for(raw_type: &str) -> Option<NativeType> {
    let simple_name = raw_type.rsplit("::").next().unwrap_or(raw_type).trim();
    PRIMITIVE_TYPES.get(simple_name).copied()
}

// Static Rust type -> CQL type table
lazy_static! {
    static ref PRIMITIVE_TYPES: HashMap<&'static str, NativeType> = {
        let mut m = HashMap::new();

        // ===== TEXT =====
        m.insert("String", NativeType::Text);
        m.insert("str", NativeType::Text);

        // ===== INTEGERS =====
        m.insert("i8", NativeType::Tinyint);
        m.insert("i16", NativeType::Smallint);
        m.insert("i32", NativeType::Int);
        m.insert("i64", NativeType::Bigint);
        m.insert("BigInt", NativeType::Varint);
        m.insert("BigInteger", NativeType::Varint);

        // ===== FLOATING POINT / DECIMAL =====
        m.insert("f32", NativeType::Float);
        m.insert("f64", NativeType::Double);
        m.insert("Decimal", NativeType::Decimal);
        m.insert("BigDecimal", NativeType::Decimal);

        m.insert("bool", NativeType::Boolean);

        // ===== TEMPORAL =====
        m.insert("DateTime", NativeType::Timestamp);
        m.insert("NaiveDateTime", NativeType::Timestamp);
        m.insert("SystemTime", NativeType::Timestamp);
        m.insert("NaiveDate", NativeType::Date);
        m.insert("NaiveTime", NativeType::Time);

        // ===== IDENTIFIERS / NETWORK / BINARY =====
        m.insert("Uuid", NativeType::Uuid);
        m.insert("IpAddr", NativeType::Inet);
        m.insert("Ipv4Addr", NativeType::Inet);
        m.insert("Ipv6Addr", NativeType::Inet);
        m.insert("Bytes", NativeType::Blob);
        m.insert("ByteBuffer", NativeType::Blob);

        m
    };
}
