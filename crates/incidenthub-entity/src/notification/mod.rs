//! Values that flow through the notification dispatch engine.

pub mod action;
pub mod entry;
pub mod group;

pub use action::ActionKind;
pub use entry::NotificationEntry;
pub use group::NotificationGroup;
