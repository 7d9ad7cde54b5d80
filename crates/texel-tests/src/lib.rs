//! Integration tests for texel crates.
//!
//! This crate contains end-to-end tests that check properties spanning
//! `texel-core` and `texel-ops`: buffer-size invariants, involutions,
//! identities, and the fixed numeric examples of each operation.
