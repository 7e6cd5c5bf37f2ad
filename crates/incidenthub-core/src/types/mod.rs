//! Shared value types used across IncidentHub crates.

pub mod id;

pub use id::{IncidentId, UserId};
