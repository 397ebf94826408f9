//! Per-assignment rule settings.
//!
//! Serves the settings form contribution and saves the rule set of one
//! plugin instance.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
