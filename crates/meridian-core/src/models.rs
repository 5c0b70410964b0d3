//! Domain models for the Meridian Events CRM.
//!
//! These are the core types shared across all crates.

pub mod client;
pub mod contract;
pub mod event;
pub mod staff;
