//! End-to-end report pipeline tests for Ocean.
//!
//! The tests under `tests/` drive the library crates the way the `ocean`
//! binary does: load configs from disk, build reports, write them through an
//! [`ArtifactStore`](ocean_core::ArtifactStore) and resolve them again
//! downstream.

pub mod helpers;
