//! Test helpers shared across crates.
//!
//! This crate provides `figment::Jail` wrappers for filesystem-backed tests
//! and small builders for expected values documents.

pub mod figment;
pub mod json;
