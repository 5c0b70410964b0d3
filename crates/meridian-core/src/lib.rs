//! Meridian Core — domain models, repository traits, and shared error
//! types for the Meridian Events CRM.
//!
//! This crate has no I/O dependencies. The database crate implements the
//! repository traits defined here; the auth crate consumes them.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{CrmError, CrmResult};
