//! Domain models for the beacon registry.
//!
//! These are the core types shared across all crates.

pub mod account_holder;
pub mod address;
pub mod beacon;
pub mod legacy_beacon;
pub mod registration;
