//! # Fileregex Config
//!
//! Configuration types for the file regex validator service.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`storage`]: Location and limits of the submitted files storage
//! - [`plugin_order`]: Position of this plugin relative to the file submission plugin
//!
//! # Example
//!
//! ```ignore
//! use fileregex_config::{CorsConfig, PluginOrderConfig, StorageConfig};
//!
//! // Load all configs from environment
//! let cors_config = CorsConfig::from_env();
//! let storage_config = StorageConfig::from_env();
//! let plugin_order = PluginOrderConfig::from_env();
//! ```

pub mod cors;
pub mod plugin_order;
pub mod storage;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use plugin_order::PluginOrderConfig;
pub use storage::StorageConfig;
