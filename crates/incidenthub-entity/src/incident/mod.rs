//! Incident snapshot, priority, and status.

pub mod model;
pub mod priority;
pub mod status;

pub use model::Incident;
pub use priority::IncidentPriority;
pub use status::IncidentStatus;
