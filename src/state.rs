use std::sync::Arc;

use fileregex_config::{CorsConfig, PluginOrderConfig, StorageConfig};
use fileregex_core::{
    BuiltinMimetypeCatalog, EnglishStrings, FileStorage, LocalFileStorage, MimetypeCatalog,
    StringLookup,
};
use fileregex_db::init_db_pool;
use sqlx::PgPool;

/// Shared state of the service.
///
/// The host collaborators (file storage, mimetype catalog, strings) sit
/// behind trait objects so tests and embedders can swap them.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub storage: Arc<dyn FileStorage>,
    pub catalog: Arc<dyn MimetypeCatalog>,
    pub strings: Arc<dyn StringLookup>,
    pub plugin_order: PluginOrderConfig,
    pub cors_config: CorsConfig,
    /// Largest stored file, also applied to the extracted entry of a zip
    pub max_file_size: usize,
}

impl AppState {
    /// State backed by local file storage, the built-in catalog and English strings.
    pub fn new(
        db: PgPool,
        storage_config: &StorageConfig,
        plugin_order: PluginOrderConfig,
        cors_config: CorsConfig,
    ) -> Self {
        let catalog: Arc<dyn MimetypeCatalog> = Arc::new(BuiltinMimetypeCatalog);
        let storage = LocalFileStorage::with_max_size(
            storage_config.base_dir.clone(),
            catalog.clone(),
            storage_config.max_file_size,
        );

        Self {
            db,
            storage: Arc::new(storage),
            catalog,
            strings: Arc::new(EnglishStrings),
            plugin_order,
            cors_config,
            max_file_size: storage_config.max_file_size,
        }
    }
}

pub async fn init_app_state() -> AppState {
    AppState::new(
        init_db_pool().await,
        &StorageConfig::from_env(),
        PluginOrderConfig::from_env(),
        CorsConfig::from_env(),
    )
}
