use fileregex_core::file_storage::{FileArea, StoredFile};
use fileregex_core::plugin::BYPASS_FIELD;
use fileregex_core::strings::StringLookup;
use fileregex_core::AppError;
use fileregex_engine::{SubmissionValidator, SubmittedFile, Verdict, fail_open, single_file};
use fileregex_observability::tracing_utils::{ErrorExt, record_validation};
use fileregex_observability::{track_file_deleted, track_submission_validated, validation_span};
use tracing::{Instrument, info};
use uuid::Uuid;

use crate::modules::mimetypes::service::MimetypeService;
use crate::modules::settings::service::SettingsService;
use crate::modules::submissions::model::{
    CheckboxField, SaveSubmissionDto, UserFormElements, ValidationOutcome,
};
use crate::state::AppState;

pub struct SubmissionService;

impl SubmissionService {
    /// Run the save hook for one submission attempt.
    ///
    /// Attempts that fail open (file count, plugin order, bypass) are
    /// accepted before any file is read or rules are loaded.
    ///
    /// A rejected file is deleted from the file submission area, and the
    /// outcome is marked as not empty so the host shows only this feedback.
    pub async fn save(
        state: &AppState,
        assignment_id: Uuid,
        submission_id: Uuid,
        dto: SaveSubmissionDto,
    ) -> Result<ValidationOutcome, AppError> {
        let span = validation_span!(assignment_id, submission_id);
        Self::validate_and_apply(state, assignment_id, submission_id, dto.bypass)
            .instrument(span)
            .await
    }

    async fn validate_and_apply(
        state: &AppState,
        assignment_id: Uuid,
        submission_id: Uuid,
        bypass: bool,
    ) -> Result<ValidationOutcome, AppError> {
        let area = FileArea::submission_files(assignment_id, submission_id);
        let files = state
            .storage
            .list_area_files(&area)
            .await
            .log_error("listing submission files")?;

        let correctly_ordered = state.plugin_order.is_correctly_ordered();
        if let Some(reason) = fail_open(files.len(), correctly_ordered, bypass) {
            record_validation(true, reason.as_str());
            track_submission_validated(true, reason.as_str());
            return Ok(ValidationOutcome::accepted());
        }
        let Some(stored) = single_file(&files) else {
            return Ok(ValidationOutcome::accepted());
        };

        let submitted = Self::read_file(state, stored).await?;
        let rules = SettingsService::load_rules(&state.db, assignment_id).await?;
        let allow_list = MimetypeService::allow_list(&state.db).await?;

        let verdict = SubmissionValidator::new(
            &rules,
            &allow_list,
            state.catalog.as_ref(),
            state.strings.as_ref(),
        )
        .with_max_entry_size(state.max_file_size)
        .validate(Some(&submitted), correctly_ordered, bypass);

        record_validation(verdict.is_accepted(), verdict.reason());
        track_submission_validated(verdict.is_accepted(), verdict.reason());

        match verdict {
            Verdict::Accepted(_) => Ok(ValidationOutcome::accepted()),
            Verdict::Rejected(rejection) => {
                if rejection.delete_file {
                    state
                        .storage
                        .delete(stored)
                        .await
                        .log_error("deleting rejected file")?;
                    track_file_deleted();
                    info!(
                        filepath = %stored.filepath,
                        reason = rejection.reason.as_str(),
                        "Removed rejected submission file"
                    );
                }

                Ok(ValidationOutcome::rejected(rejection.feedback))
            }
        }
    }

    async fn read_file(state: &AppState, file: &StoredFile) -> Result<SubmittedFile, AppError> {
        let content = state
            .storage
            .read(file)
            .await
            .log_error("reading submission file")?;

        Ok(SubmittedFile::new(
            file.filename.clone(),
            file.mimetype.clone(),
            content,
        ))
    }

    /// Extra fields for the learner's submission form. The bypass checkbox is
    /// offered only when the request carried the bypass parameter.
    pub fn form_elements(bypass_requested: bool, strings: &dyn StringLookup) -> UserFormElements {
        UserFormElements {
            bypass: bypass_requested.then(|| CheckboxField {
                name: BYPASS_FIELD.to_string(),
                label: strings.get_string("ignorevalidationerrors", None),
            }),
        }
    }
}
