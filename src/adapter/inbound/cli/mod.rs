//! CLI module graph.

pub mod accuracy;
pub mod command;
pub mod dispatch;
pub mod export;
pub mod history;
pub mod output;
pub mod paths;
pub mod predict;
pub mod reconcile;
