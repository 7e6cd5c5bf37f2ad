//! # incidenthub-entity
//!
//! Domain entity models for IncidentHub. Incidents and users are snapshots
//! handed over by the storage collaborator; notification types are the
//! in-memory values that flow through the dispatch engine.

pub mod incident;
pub mod notification;
pub mod user;
