//! Diesel connection, schema, and row types.

pub mod connection;
pub mod model;
pub mod schema;
