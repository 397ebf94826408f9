use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// The accepted mimetypes admin setting.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MimetypeSetting {
    pub label: String,
    pub help: String,
    /// Stored value, one mimetype per line
    pub value: String,
    /// Value seeded at install time
    pub default_value: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMimetypesDto {
    /// One mimetype per line; lines starting with `#` are ignored
    #[validate(length(max = 65535))]
    pub value: String,
}
