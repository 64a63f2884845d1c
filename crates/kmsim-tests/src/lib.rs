//! Integration tests for the kmsim crates.
//!
//! These tests run the simulation pipeline across crate boundaries the way
//! the CLI does: decode, estimate, region-grow, composite, guard, encode.
