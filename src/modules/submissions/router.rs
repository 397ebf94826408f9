use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_form_elements, save_submission};

pub fn init_submissions_router() -> Router<AppState> {
    Router::new()
        .route("/{submission_id}/save", post(save_submission))
        .route("/{submission_id}/form", get(get_form_elements))
}
