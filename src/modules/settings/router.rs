use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_settings_form, save_settings};

pub fn init_settings_router() -> Router<AppState> {
    Router::new().route("/", get(get_settings_form).put(save_settings))
}
