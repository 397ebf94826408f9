//! Submission save hook.
//!
//! Validates the file a learner just submitted, removes it when it is
//! rejected, and describes the extra form fields the plugin adds.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
