use anyhow::anyhow;
use fileregex_core::AppError;
use fileregex_core::mimetypes::MimetypeCatalog;
use fileregex_core::plugin::{COMPONENT, MIMETYPES_SETTING};
use fileregex_core::strings::StringLookup;
use fileregex_db::PluginConfigRepository;
use fileregex_engine::MimetypeAllowList;
use fileregex_observability::{audit_event, track_mimetypes_updated};
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::mimetypes::model::{MimetypeSetting, UpdateMimetypesDto};

pub struct MimetypeService;

impl MimetypeService {
    /// Raw stored value; empty when never set.
    #[instrument(skip(db))]
    pub async fn stored_value(db: &PgPool) -> Result<String, AppError> {
        let value = PluginConfigRepository::get_global(db, COMPONENT, MIMETYPES_SETTING).await?;
        Ok(value.unwrap_or_default())
    }

    pub async fn allow_list(db: &PgPool) -> Result<MimetypeAllowList, AppError> {
        let value = Self::stored_value(db).await?;
        Ok(MimetypeAllowList::parse(&value))
    }

    fn describe(
        value: String,
        catalog: &dyn MimetypeCatalog,
        strings: &dyn StringLookup,
    ) -> MimetypeSetting {
        MimetypeSetting {
            label: strings.get_string("acceptedmimetypes", None),
            help: strings.get_string("acceptedmimetypes_help", None),
            value,
            default_value: MimetypeAllowList::default_setting(catalog),
        }
    }

    #[instrument(skip(db, catalog, strings))]
    pub async fn get_setting(
        db: &PgPool,
        catalog: &dyn MimetypeCatalog,
        strings: &dyn StringLookup,
    ) -> Result<MimetypeSetting, AppError> {
        let value = Self::stored_value(db).await?;
        Ok(Self::describe(value, catalog, strings))
    }

    /// Validate and store a new value.
    ///
    /// Every entry must be known to the catalog; otherwise the whole value is
    /// rejected with the list of unknown entries.
    #[instrument(skip(db, catalog, strings))]
    pub async fn update_setting(
        db: &PgPool,
        catalog: &dyn MimetypeCatalog,
        strings: &dyn StringLookup,
        dto: UpdateMimetypesDto,
    ) -> Result<MimetypeSetting, AppError> {
        if let Err(invalid) = MimetypeAllowList::validate_setting(&dto.value, catalog) {
            let message = strings.get_string("invalidtypesfound", Some(&invalid.unknown.join(", ")));
            return Err(AppError::unprocessable(anyhow!(message)));
        }

        PluginConfigRepository::set_global(db, COMPONENT, MIMETYPES_SETTING, &dto.value).await?;

        track_mimetypes_updated();
        audit_event!(
            "mimetypes.update",
            "config_plugins",
            entries = MimetypeAllowList::parse(&dto.value).len()
        );

        Ok(Self::describe(dto.value, catalog, strings))
    }
}
