use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::modules::mimetypes::model::{MimetypeSetting, UpdateMimetypesDto};
use crate::modules::settings::model::{
    EnableConstraints, MatchMode, Rule, RuleFieldGroup, RuleSet, SelectOption, SettingsForm,
    SettingsFormParams,
};
use crate::modules::submissions::model::{
    CheckboxField, FormElementsParams, SaveSubmissionDto, SaveSubmissionResponse,
    UserFormElements,
};

/// Body of every error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::settings::controller::get_settings_form,
        crate::modules::settings::controller::save_settings,
        crate::modules::submissions::controller::save_submission,
        crate::modules::submissions::controller::get_form_elements,
        crate::modules::mimetypes::controller::get_mimetypes,
        crate::modules::mimetypes::controller::update_mimetypes,
    ),
    components(
        schemas(
            MatchMode,
            Rule,
            RuleSet,
            SettingsForm,
            SettingsFormParams,
            RuleFieldGroup,
            SelectOption,
            EnableConstraints,
            SaveSubmissionDto,
            SaveSubmissionResponse,
            FormElementsParams,
            UserFormElements,
            CheckboxField,
            MimetypeSetting,
            UpdateMimetypesDto,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Settings", description = "Per-assignment validation rules"),
        (name = "Submissions", description = "Submission save hook and form fields"),
        (name = "Admin", description = "Site-wide plugin settings")
    ),
    info(
        title = "Fileregex API",
        version = "0.1.0",
        description = "Validates single-file assignment submissions against file name and content regular expressions.",
        license(
            name = "GPL-3.0-or-later"
        )
    )
)]
pub struct ApiDoc;
