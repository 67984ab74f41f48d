//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod aggregator;
pub mod presenter;
pub mod reconciler;
pub mod store;
pub mod submission;
