use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use fileregex_core::AppError;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::settings::model::{RawSettings, RuleSet, SettingsForm, SettingsFormParams};
use crate::modules::settings::service::SettingsService;
use crate::state::AppState;

/// Get the settings form contribution for an assignment
#[utoipa::path(
    get,
    path = "/api/assignments/{assignment_id}/fileregex/settings",
    params(
        ("assignment_id" = Uuid, Path, description = "Assignment ID"),
        SettingsFormParams
    ),
    responses(
        (status = 200, description = "Settings form with the stored rules", body = SettingsForm)
    ),
    tag = "Settings"
)]
#[instrument(skip(state))]
pub async fn get_settings_form(
    State(state): State<AppState>,
    Path(assignment_id): Path<Uuid>,
    Query(params): Query<SettingsFormParams>,
) -> Result<Json<SettingsForm>, AppError> {
    let form = SettingsService::get_settings_form(
        &state.db,
        assignment_id,
        &params,
        state.plugin_order.is_correctly_ordered(),
        state.strings.as_ref(),
    )
    .await?;

    Ok(Json(form))
}

/// Save the rules of an assignment
///
/// Takes the flat field map posted by the settings form. Content rules with
/// an empty regex are discarded and the remaining ones renumbered.
#[utoipa::path(
    put,
    path = "/api/assignments/{assignment_id}/fileregex/settings",
    params(("assignment_id" = Uuid, Path, description = "Assignment ID")),
    request_body(content = HashMap<String, String>, description = "Form fields keyed `assignsubmission_fileregex_*`"),
    responses(
        (status = 200, description = "Rules saved", body = RuleSet),
        (status = 400, description = "Malformed body")
    ),
    tag = "Settings"
)]
#[instrument(skip(state, raw))]
pub async fn save_settings(
    State(state): State<AppState>,
    Path(assignment_id): Path<Uuid>,
    Json(raw): Json<RawSettings>,
) -> Result<Json<RuleSet>, AppError> {
    let rules = SettingsService::save_settings(&state.db, assignment_id, raw).await?;
    Ok(Json(rules))
}
