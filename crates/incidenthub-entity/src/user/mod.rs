//! User records as returned by the user directory.

pub mod model;

pub use model::User;
