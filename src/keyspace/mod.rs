//! Keyspace specifications
//!
//! A [`KeyspaceSpec`] describes the replication settings of a keyspace. It is
//! built once through [`KeyspaceSpecBuilder`] and is immutable afterwards; the
//! CQL generator consumes it to render `CREATE KEYSPACE` statements.

pub mod spec;

pub use spec::{KeyspaceSpec, KeyspaceSpecBuilder, ReplicationStrategy};
