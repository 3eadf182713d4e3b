use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::mapping::errors::MappingError;
use crate::mapping::identifier::CqlIdentifier;

/// Replication strategy class of a keyspace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ReplicationStrategy {
    #[default]
    Simple,
    NetworkTopology,
    /// Any other strategy class, passed through verbatim
    Custom(String),
}

impl ReplicationStrategy {
    pub fn as_str(&self) -> &str {
        match self {
            ReplicationStrategy::Simple => "SimpleStrategy",
            ReplicationStrategy::NetworkTopology => "NetworkTopologyStrategy",
            ReplicationStrategy::Custom(class) => class,
        }
    }
}

impl From<&str> for ReplicationStrategy {
    fn from(value: &str) -> Self {
        let value = value.trim();
        let simple_name = value.rsplit('.').next().unwrap_or(value);
        match simple_name {
            "SimpleStrategy" => ReplicationStrategy::Simple,
            "NetworkTopologyStrategy" => ReplicationStrategy::NetworkTopology,
            _ => ReplicationStrategy::Custom(value.to_string()),
        }
    }
}

impl fmt::Display for ReplicationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ReplicationStrategy {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Immutable keyspace specification
///
/// # Example
/// ```ignore
/// let spec = KeyspaceSpec::builder("telemetry")
///     .replication_strategy(ReplicationStrategy::NetworkTopology)
///     .data_center("dc1", 3)
///     .data_center("dc2", 2)
///     .build()?;
/// assert_eq!(spec.data_centers().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyspaceSpec {
    name: CqlIdentifier,
    replication_strategy: ReplicationStrategy,
    replication_factor: u32,
    data_centers: BTreeMap<String, u32>,
    durable_writes: bool,
    if_not_exists: bool,
}

impl KeyspaceSpec {
    pub fn builder(name: impl Into<String>) -> KeyspaceSpecBuilder {
        KeyspaceSpecBuilder::new(name)
    }

    pub fn name(&self) -> &CqlIdentifier {
        &self.name
    }

    pub fn replication_strategy(&self) -> &ReplicationStrategy {
        &self.replication_strategy
    }

    pub fn replication_factor(&self) -> u32 {
        self.replication_factor
    }

    /// Replicas per data center, as a read-only view
    pub fn data_centers(&self) -> &BTreeMap<String, u32> {
        &self.data_centers
    }

    pub fn durable_writes(&self) -> bool {
        self.durable_writes
    }

    pub fn if_not_exists(&self) -> bool {
        self.if_not_exists
    }
}

/// Builder for [`KeyspaceSpec`]
#[derive(Debug, Clone)]
pub struct KeyspaceSpecBuilder {
    name: String,
    replication_strategy: ReplicationStrategy,
    replication_factor: u32,
    data_centers: BTreeMap<String, u32>,
    durable_writes: bool,
    if_not_exists: bool,
}

impl KeyspaceSpecBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        KeyspaceSpecBuilder {
            name: name.into(),
            replication_strategy: ReplicationStrategy::default(),
            replication_factor: 1,
            data_centers: BTreeMap::new(),
            durable_writes: true,
            if_not_exists: false,
        }
    }

    pub fn replication_strategy(mut self, strategy: ReplicationStrategy) -> Self {
        self.replication_strategy = strategy;
        self
    }

    pub fn replication_factor(mut self, factor: u32) -> Self {
        self.replication_factor = factor;
        self
    }

    /// Set the replica count of one data center; a repeated name replaces
    /// the earlier count
    pub fn data_center(mut self, name: impl Into<String>, replicas: u32) -> Self {
        self.data_centers.insert(name.into(), replicas);
        self
    }

    /// Replace all data centers
    pub fn data_centers(mut self, data_centers: BTreeMap<String, u32>) -> Self {
        self.data_centers = data_centers;
        self
    }

    pub fn durable_writes(mut self, durable_writes: bool) -> Self {
        self.durable_writes = durable_writes;
        self
    }

    pub fn if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = if_not_exists;
        self
    }

    pub fn build(self) -> Result<KeyspaceSpec, MappingError> {
        let name = CqlIdentifier::unquoted(&self.name)?;

        if self.replication_factor == 0 {
            return Err(MappingError::InvalidKeyspace {
                message: format!("replication factor of keyspace '{}' must be positive", self.name),
            });
        }
        if let Some(dc) = self.data_centers.keys().find(|dc| dc.trim().is_empty()) {
            return Err(MappingError::InvalidKeyspace {
                message: format!("blank data center name '{}' in keyspace '{}'", dc, self.name),
            });
        }
        if self.replication_strategy == ReplicationStrategy::NetworkTopology
            && self.data_centers.is_empty()
        {
            return Err(MappingError::InvalidKeyspace {
                message: format!(
                    "keyspace '{}' uses NetworkTopologyStrategy but declares no data centers",
                    self.name
                ),
            });
        }

        Ok(KeyspaceSpec {
            name,
            replication_strategy: self.replication_strategy,
            replication_factor: self.replication_factor,
            data_centers: self.data_centers,
            durable_writes: self.durable_writes,
            if_not_exists: self.if_not_exists,
        })
    }
}
