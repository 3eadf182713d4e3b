//! CQL identifiers
//!
//! Unquoted CQL identifiers are case-insensitive and are stored lower-cased.
//! Quoted identifiers keep their exact spelling and render inside double
//! quotes. A name that cannot legally appear unquoted (reserved keyword,
//! spaces, leading digit, ...) is quoted automatically.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

use super::errors::MappingError;

lazy_static! {
    static ref UNQUOTED_IDENTIFIER: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").unwrap();

    static ref RESERVED_KEYWORDS: HashSet<&'static str> = [
        "add", "allow", "alter", "and", "apply", "asc", "authorize", "batch", "begin", "by",
        "columnfamily", "create", "delete", "desc", "describe", "drop", "entries", "execute",
        "from", "full", "grant", "if", "in", "index", "infinity", "insert", "into", "keyspace",
        "limit", "modify", "nan", "norecursive", "not", "null", "of", "on", "or", "order",
        "primary", "rename", "replace", "revoke", "schema", "select", "set", "table", "to",
        "token", "truncate", "unlogged", "update", "use", "using", "where", "with",
    ]
    .into_iter()
    .collect();
}

/// Check whether `name` may appear unquoted in a CQL statement
pub fn is_unquoted_identifier(name: &str) -> bool {
    UNQUOTED_IDENTIFIER.is_match(name) && !is_reserved_keyword(name)
}

pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(name.to_lowercase().as_str())
}

/// Column, table or keyspace identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CqlIdentifier {
    identifier: String,
    quoted: bool,
}

impl CqlIdentifier {
    /// Create an identifier, quoting it when forced or when required
    ///
    /// # Example
    /// ```ignore
    /// assert_eq!(CqlIdentifier::new("SensorId", false)?.to_cql(), "sensorid");
    /// assert_eq!(CqlIdentifier::new("SensorId", true)?.to_cql(), "\"SensorId\"");
    /// assert_eq!(CqlIdentifier::new("order", false)?.to_cql(), "\"order\"");
    /// ```
    pub fn new(name: &str, force_quote: bool) -> Result<Self, MappingError> {
        if name.trim().is_empty() {
            return Err(MappingError::InvalidIdentifier {
                identifier: name.to_string(),
                reason: "identifier must not be blank".to_string(),
            });
        }

        if !force_quote && is_unquoted_identifier(name) {
            return Ok(CqlIdentifier {
                identifier: name.to_lowercase(),
                quoted: false,
            });
        }

        Ok(CqlIdentifier {
            identifier: name.to_string(),
            quoted: true,
        })
    }

    pub fn unquoted(name: &str) -> Result<Self, MappingError> {
        CqlIdentifier::new(name, false)
    }

    pub fn quoted(name: &str) -> Result<Self, MappingError> {
        CqlIdentifier::new(name, true)
    }

    /// Identifier text without quotes
    pub fn as_str(&self) -> &str {
        &self.identifier
    }

    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// Render the identifier for use in a CQL statement
    pub fn to_cql(&self) -> String {
        if self.quoted {
            format!("\"{}\"", self.identifier.replace('"', "\"\""))
        } else {
            self.identifier.clone()
        }
    }
}

impl fmt::Display for CqlIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cql())
    }
}

impl Serialize for CqlIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
