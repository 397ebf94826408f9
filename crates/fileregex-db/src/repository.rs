//! Plugin configuration tables.
//!
//! `assign_plugin_config` holds the settings of one plugin instance, keyed by
//! assignment, plugin and subtype. `config_plugins` holds site-wide settings
//! keyed by component. Every function accepts any executor so callers can
//! group writes in a transaction.

use std::collections::BTreeMap;

use sqlx::PgExecutor;
use tracing::instrument;
use uuid::Uuid;

pub struct PluginConfigRepository;

impl PluginConfigRepository {
    /// All settings of one instance. Null values read as empty strings.
    #[instrument(skip(db))]
    pub async fn get_config<'e, E: PgExecutor<'e>>(
        db: E,
        assignment: Uuid,
        plugin: &str,
        subtype: &str,
    ) -> Result<BTreeMap<String, String>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (String, Option<String>)>(
            r#"SELECT name, value FROM assign_plugin_config
               WHERE assignment = $1 AND plugin = $2 AND subtype = $3"#,
        )
        .bind(assignment)
        .bind(plugin)
        .bind(subtype)
        .fetch_all(db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, value)| (name, value.unwrap_or_default()))
            .collect())
    }

    #[instrument(skip(db, value))]
    pub async fn set_config<'e, E: PgExecutor<'e>>(
        db: E,
        assignment: Uuid,
        plugin: &str,
        subtype: &str,
        name: &str,
        value: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"INSERT INTO assign_plugin_config (assignment, plugin, subtype, name, value)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (assignment, plugin, subtype, name)
               DO UPDATE SET value = EXCLUDED.value"#,
        )
        .bind(assignment)
        .bind(plugin)
        .bind(subtype)
        .bind(name)
        .bind(value)
        .execute(db)
        .await?;

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn remove_config<'e, E: PgExecutor<'e>>(
        db: E,
        assignment: Uuid,
        plugin: &str,
        subtype: &str,
        name: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"DELETE FROM assign_plugin_config
               WHERE assignment = $1 AND plugin = $2 AND subtype = $3 AND name = $4"#,
        )
        .bind(assignment)
        .bind(plugin)
        .bind(subtype)
        .bind(name)
        .execute(db)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete every indexed content rule entry (`content_<n>_*`) of an
    /// instance. The rule count key is left alone.
    #[instrument(skip(db))]
    pub async fn remove_content_config<'e, E: PgExecutor<'e>>(
        db: E,
        assignment: Uuid,
        plugin: &str,
        subtype: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"DELETE FROM assign_plugin_config
               WHERE assignment = $1 AND plugin = $2 AND subtype = $3
                 AND name ~ '^content_[0-9]+_'"#,
        )
        .bind(assignment)
        .bind(plugin)
        .bind(subtype)
        .execute(db)
        .await?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(db))]
    pub async fn get_global<'e, E: PgExecutor<'e>>(
        db: E,
        component: &str,
        name: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT value FROM config_plugins WHERE plugin = $1 AND name = $2",
        )
        .bind(component)
        .bind(name)
        .fetch_optional(db)
        .await
    }

    #[instrument(skip(db, value))]
    pub async fn set_global<'e, E: PgExecutor<'e>>(
        db: E,
        component: &str,
        name: &str,
        value: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"INSERT INTO config_plugins (plugin, name, value)
               VALUES ($1, $2, $3)
               ON CONFLICT (plugin, name) DO UPDATE SET value = EXCLUDED.value"#,
        )
        .bind(component)
        .bind(name)
        .bind(value)
        .execute(db)
        .await?;

        Ok(())
    }
}
