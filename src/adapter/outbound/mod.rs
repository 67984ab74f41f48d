//! Outbound adapters (driven side).

pub mod http;
pub mod json;
pub mod memory;
pub mod price_feed;
pub mod sqlite;
