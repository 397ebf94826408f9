//! Settings models, re-exported from the `fileregex-models` crate.

pub use fileregex_models::rules::{MatchMode, Rule, RuleSet};
pub use fileregex_models::settings::*;
