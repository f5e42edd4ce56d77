//! Pipeline tests for the processor module
//!
//! Exercise the compaction pipeline end to end on small sector packages
//! written into a temporary archive directory.

pub mod basic_processing;
pub mod error_handling;
pub mod fixtures;
pub mod schema_union_tests;
