//! avl-forest-util - Test utilities for avl-forest
//!
//! Currently just the seeded [`Fuzzer`] that drives the randomized tree
//! scenarios reproducibly.

pub mod fuzzer;

pub use fuzzer::Fuzzer;
