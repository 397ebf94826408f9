use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_mimetypes, update_mimetypes};

pub fn init_mimetypes_router() -> Router<AppState> {
    Router::new().route("/", get(get_mimetypes).put(update_mimetypes))
}
