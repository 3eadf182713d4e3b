//! Integration tests - Tests that load mapping definitions from disk
//!
//! These tests verify that definition loading, context building, validation
//! and CQL generation work together.

mod schema_generation_tests;
