//! # incidenthub-notify
//!
//! Notification dispatch engine for IncidentHub. Provides:
//!
//! - Recipient resolution (creator and assignee of an incident)
//! - Per-action deduplication with an optional retention window
//! - An in-memory queue of pending notifications
//! - Grouping of pending notifications into per-recipient, per-priority digests
//! - A periodic dispatcher that renders digests and hands them to a delivery channel
//! - Producer hooks called by incident mutation handlers

pub mod dedup;
pub mod delivery;
pub mod directory;
pub mod dispatcher;
pub mod engine;
pub mod formatter;
pub mod grouping;
pub mod metrics;
pub mod queue;
pub mod resolver;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use dedup::DedupFilter;
pub use delivery::{DeliveryChannel, OutboundMessage};
pub use directory::UserDirectory;
pub use dispatcher::{CycleReport, NotificationDispatcher};
pub use engine::NotificationEngine;
pub use queue::NotificationQueue;
pub use service::NotificationService;
