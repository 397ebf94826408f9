use axum::{
    Json,
    extract::{Path, Query, State},
};
use fileregex_core::AppError;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::submissions::model::{
    FormElementsParams, SaveSubmissionDto, SaveSubmissionResponse, UserFormElements,
};
use crate::modules::submissions::service::SubmissionService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Validate the file of a submission attempt
///
/// A rejection is not an HTTP error: the response carries `accepted: false`,
/// the feedback to display and `offer_bypass`. The rejected file has already
/// been removed from the submission.
#[utoipa::path(
    post,
    path = "/api/assignments/{assignment_id}/fileregex/submissions/{submission_id}/save",
    params(
        ("assignment_id" = Uuid, Path, description = "Assignment ID"),
        ("submission_id" = Uuid, Path, description = "Submission ID")
    ),
    request_body = SaveSubmissionDto,
    responses(
        (status = 200, description = "Validation outcome", body = SaveSubmissionResponse),
        (status = 400, description = "Malformed body"),
        (status = 500, description = "Storage or database failure")
    ),
    tag = "Submissions"
)]
#[instrument(skip(state))]
pub async fn save_submission(
    State(state): State<AppState>,
    Path((assignment_id, submission_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(dto): ValidatedJson<SaveSubmissionDto>,
) -> Result<Json<SaveSubmissionResponse>, AppError> {
    let outcome = SubmissionService::save(&state, assignment_id, submission_id, dto).await?;
    Ok(Json(SaveSubmissionResponse::from(&outcome)))
}

/// Get the plugin's fields for the submission form
#[utoipa::path(
    get,
    path = "/api/assignments/{assignment_id}/fileregex/submissions/{submission_id}/form",
    params(
        ("assignment_id" = Uuid, Path, description = "Assignment ID"),
        ("submission_id" = Uuid, Path, description = "Submission ID"),
        FormElementsParams
    ),
    responses(
        (status = 200, description = "Form elements", body = UserFormElements)
    ),
    tag = "Submissions"
)]
#[instrument(skip(state))]
pub async fn get_form_elements(
    State(state): State<AppState>,
    Path((_assignment_id, _submission_id)): Path<(Uuid, Uuid)>,
    Query(params): Query<FormElementsParams>,
) -> Json<UserFormElements> {
    Json(SubmissionService::form_elements(
        params.bypass,
        state.strings.as_ref(),
    ))
}
