//! Shared test utilities for doclib integration tests.
//!
//! - `TestHarness` builds a `Library` per backend inside a temp directory
//! - Builders for configurations and uploads

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::TestHarness;
