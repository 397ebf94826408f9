use axum::{Json, extract::State};
use fileregex_core::AppError;
use tracing::instrument;

use crate::modules::mimetypes::model::{MimetypeSetting, UpdateMimetypesDto};
use crate::modules::mimetypes::service::MimetypeService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Get the accepted mimetypes setting
#[utoipa::path(
    get,
    path = "/api/admin/fileregex/mimetypes",
    responses(
        (status = 200, description = "Current and default accepted mimetypes", body = MimetypeSetting)
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_mimetypes(
    State(state): State<AppState>,
) -> Result<Json<MimetypeSetting>, AppError> {
    let setting =
        MimetypeService::get_setting(&state.db, state.catalog.as_ref(), state.strings.as_ref())
            .await?;
    Ok(Json(setting))
}

/// Update the accepted mimetypes setting
#[utoipa::path(
    put,
    path = "/api/admin/fileregex/mimetypes",
    request_body = UpdateMimetypesDto,
    responses(
        (status = 200, description = "Setting saved", body = MimetypeSetting),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Unknown mimetypes in the list")
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn update_mimetypes(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<UpdateMimetypesDto>,
) -> Result<Json<MimetypeSetting>, AppError> {
    let setting = MimetypeService::update_setting(
        &state.db,
        state.catalog.as_ref(),
        state.strings.as_ref(),
        dto,
    )
    .await?;
    Ok(Json(setting))
}
