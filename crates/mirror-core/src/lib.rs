//! mirror-core: Archetype model, reference data, scoring and navigation.
//!
//! This crate defines the data model, the scoring routine and the
//! capability traits that the rest of the archetype mirror builds on.

pub mod chakra;
pub mod data;
pub mod error;
pub mod model;
pub mod navigation;
pub mod pairing;
pub mod quiz;
pub mod report;
pub mod scoring;
pub mod summary;
pub mod traits;
