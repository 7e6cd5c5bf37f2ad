//! End-to-end tests driving the notification engine through fake
//! collaborators.

mod helpers;
mod notification_flow_test;
