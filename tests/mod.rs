//! Integration tests for MovieFinder
//!
//! Tests are organized by component:
//! - omdb_test: OMDb API client tests
//! - cli_test: Argument parsing and command handlers
//! - ui_test: Rendering of both screens
//! - e2e_test: End-to-end flows (Search -> Detail -> Back, out-of-order responses)

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
