//! Unit tests - Tests of the public mapping API that need no files or environment
//!
//! These tests exercise type resolution, column naming and keyspace
//! specifications through the crate's public interface.

mod column_name_tests;
mod keyspace_spec_tests;
mod type_resolution_tests;
