// tests/support/mod.rs
// Shared mocks for the integration test binaries. Individual test crates use
// different subsets, so dead_code warnings are allowed at the module level.
#[allow(dead_code, unused_imports)]
pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;
