//! Seeding of the accepted mimetypes setting.

use fileregex_core::mimetypes::MimetypeCatalog;
use fileregex_core::plugin::{COMPONENT, MIMETYPES_SETTING, PLUGIN_VERSION, VERSION_SETTING};
use fileregex_db::PluginConfigRepository;
use fileregex_engine::MimetypeAllowList;
use sqlx::PgPool;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The default list was stored
    Seeded(String),
    /// A value already existed and was kept
    AlreadyConfigured,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// The stored version predates the current default list, which was reseeded
    Reseeded { from: i64 },
    UpToDate { version: i64 },
    /// No version was recorded; ran the install hook instead
    Installed(InstallOutcome),
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

pub async fn stored_version(pool: &PgPool) -> Result<Option<i64>, sqlx::Error> {
    let version = PluginConfigRepository::get_global(pool, COMPONENT, VERSION_SETTING).await?;
    Ok(version.and_then(|v| v.trim().parse().ok()))
}

async fn record_version(pool: &PgPool) -> Result<(), sqlx::Error> {
    PluginConfigRepository::set_global(pool, COMPONENT, VERSION_SETTING, &PLUGIN_VERSION.to_string())
        .await
}

/// Store the default accepted mimetypes unless a value already exists.
pub async fn install(
    pool: &PgPool,
    catalog: &dyn MimetypeCatalog,
) -> Result<InstallOutcome, sqlx::Error> {
    let existing = PluginConfigRepository::get_global(pool, COMPONENT, MIMETYPES_SETTING).await?;

    let outcome = match existing {
        Some(_) => InstallOutcome::AlreadyConfigured,
        None => {
            let value = MimetypeAllowList::default_setting(catalog);
            PluginConfigRepository::set_global(pool, COMPONENT, MIMETYPES_SETTING, &value).await?;
            info!("Seeded default accepted mimetypes");
            InstallOutcome::Seeded(value)
        }
    };

    record_version(pool).await?;
    Ok(outcome)
}

/// Bring the stored setting up to the current version.
///
/// `from_version` overrides the recorded version.
pub async fn upgrade(
    pool: &PgPool,
    catalog: &dyn MimetypeCatalog,
    from_version: Option<i64>,
) -> Result<UpgradeOutcome, sqlx::Error> {
    let from = match from_version {
        Some(version) => version,
        None => match stored_version(pool).await? {
            Some(version) => version,
            None => return Ok(UpgradeOutcome::Installed(install(pool, catalog).await?)),
        },
    };

    if from >= PLUGIN_VERSION {
        return Ok(UpgradeOutcome::UpToDate { version: from });
    }

    reset_mimetypes(pool, catalog).await?;
    record_version(pool).await?;
    info!(from, to = PLUGIN_VERSION, "Upgraded accepted mimetypes");

    Ok(UpgradeOutcome::Reseeded { from })
}

/// Overwrite the setting with the default list.
pub async fn reset_mimetypes(
    pool: &PgPool,
    catalog: &dyn MimetypeCatalog,
) -> Result<String, sqlx::Error> {
    let value = MimetypeAllowList::default_setting(catalog);
    PluginConfigRepository::set_global(pool, COMPONENT, MIMETYPES_SETTING, &value).await?;
    Ok(value)
}

pub async fn current_mimetypes(pool: &PgPool) -> Result<Option<String>, sqlx::Error> {
    PluginConfigRepository::get_global(pool, COMPONENT, MIMETYPES_SETTING).await
}
