use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Save hook input for one submission attempt.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct SaveSubmissionDto {
    /// Learner asked to ignore validation warnings
    #[serde(default, alias = "assignsubmission_fileregex_bypass")]
    pub bypass: bool,
}

/// Result of one save attempt. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub accepted: bool,
    pub feedback: Option<String>,
    /// Set after a rejection so the host's "was anything submitted" check does
    /// not add an empty-submission error next to the validation feedback.
    pub fake_not_empty: bool,
}

impl ValidationOutcome {
    pub fn accepted() -> Self {
        Self {
            accepted: true,
            feedback: None,
            fake_not_empty: false,
        }
    }

    pub fn rejected(feedback: impl Into<String>) -> Self {
        Self {
            accepted: false,
            feedback: Some(feedback.into()),
            fake_not_empty: true,
        }
    }

    /// The plugin's own "is submission empty" answer.
    ///
    /// The plugin stores no data of its own, so it reports empty unless a
    /// rejection removed the file.
    pub fn is_empty(&self) -> bool {
        !self.fake_not_empty
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveSubmissionResponse {
    pub accepted: bool,
    pub feedback: Option<String>,
    pub submission_empty: bool,
    /// The next form should show the bypass checkbox
    pub offer_bypass: bool,
}

impl From<&ValidationOutcome> for SaveSubmissionResponse {
    fn from(outcome: &ValidationOutcome) -> Self {
        Self {
            accepted: outcome.accepted,
            feedback: outcome.feedback.clone(),
            submission_empty: outcome.is_empty(),
            offer_bypass: !outcome.accepted,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct FormElementsParams {
    /// Whether the current request carried the bypass field
    #[serde(default)]
    pub bypass: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckboxField {
    pub name: String,
    pub label: String,
}

/// Extra fields the plugin adds to the learner's submission form.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserFormElements {
    pub bypass: Option<CheckboxField>,
}
