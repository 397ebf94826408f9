use fileregex_core::AppError;
use fileregex_core::plugin::{PLUGIN, SUBTYPE};
use fileregex_core::strings::StringLookup;
use fileregex_db::PluginConfigRepository;
use fileregex_observability::audit_event;
use fileregex_observability::track_settings_saved;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::settings::model::{RawSettings, RuleSet, SettingsForm, SettingsFormParams};

pub struct SettingsService;

impl SettingsService {
    /// The stored rule set of one instance. Unconfigured instances have no rules.
    #[instrument(skip(db))]
    pub async fn load_rules(db: &PgPool, assignment_id: Uuid) -> Result<RuleSet, AppError> {
        let config = PluginConfigRepository::get_config(db, assignment_id, PLUGIN, SUBTYPE).await?;
        Ok(RuleSet::from_config(&config))
    }

    #[instrument(skip(db, strings))]
    pub async fn get_settings_form(
        db: &PgPool,
        assignment_id: Uuid,
        params: &SettingsFormParams,
        correctly_ordered: bool,
        strings: &dyn StringLookup,
    ) -> Result<SettingsForm, AppError> {
        let rules = Self::load_rules(db, assignment_id).await?;
        Ok(SettingsForm::build(&rules, params, correctly_ordered, strings))
    }

    /// Replace the instance's rules with the submitted form values.
    ///
    /// Content rules without a pattern are dropped and the rest renumbered
    /// from 0. Every indexed content entry is removed before the survivors are
    /// written, so no entry from a previously larger rule set remains.
    #[instrument(skip(db, raw))]
    pub async fn save_settings(
        db: &PgPool,
        assignment_id: Uuid,
        raw: RawSettings,
    ) -> Result<RuleSet, AppError> {
        let rules = raw.into_rule_set();

        let mut tx = db.begin().await?;

        let removed =
            PluginConfigRepository::remove_content_config(&mut *tx, assignment_id, PLUGIN, SUBTYPE)
                .await?;

        for (name, value) in rules.to_config_entries() {
            PluginConfigRepository::set_config(
                &mut *tx,
                assignment_id,
                PLUGIN,
                SUBTYPE,
                &name,
                &value,
            )
            .await?;
        }

        tx.commit().await?;

        track_settings_saved(rules.content.len());
        audit_event!(
            "settings.save",
            "assign_plugin_config",
            assignment.id = %assignment_id,
            content_rules = rules.content.len(),
            removed_entries = removed
        );

        Ok(rules)
    }
}
