#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use fileregex::fileregex_config::{CorsConfig, PluginOrderConfig, StorageConfig};
use fileregex::fileregex_core::file_storage::{FileArea, LocalFileStorage, StoredFile};
use fileregex::fileregex_core::mimetypes::BuiltinMimetypeCatalog;
use fileregex::router::init_router;
use fileregex::state::AppState;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Application state over a temporary file area. Keep the `TempDir` alive
/// for the duration of the test.
pub fn test_state(pool: PgPool, plugin_order: PluginOrderConfig) -> (AppState, TempDir) {
    dotenvy::dotenv().ok();
    let dir = TempDir::new().unwrap();
    let storage_config = StorageConfig {
        base_dir: dir.path().to_path_buf(),
        max_file_size: 1024 * 1024,
    };
    let state = AppState::new(pool, &storage_config, plugin_order, CorsConfig::default());
    (state, dir)
}

/// Store a file in the file submission plugin's area, as the host would.
pub async fn submit_file(
    dir: &TempDir,
    assignment_id: Uuid,
    submission_id: Uuid,
    filename: &str,
    content: &[u8],
) -> StoredFile {
    let storage = LocalFileStorage::new(dir.path().to_path_buf(), Arc::new(BuiltinMimetypeCatalog));
    let area = FileArea::submission_files(assignment_id, submission_id);
    storage.save(&area, filename, content).await.unwrap()
}

pub async fn area_files(state: &AppState, assignment_id: Uuid, submission_id: Uuid) -> Vec<StoredFile> {
    let area = FileArea::submission_files(assignment_id, submission_id);
    state.storage.list_area_files(&area).await.unwrap()
}

pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Send a JSON request through a fresh router.
pub async fn send(
    state: &AppState,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = init_router(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, body)
}

pub fn settings_uri(assignment_id: Uuid) -> String {
    format!("/api/assignments/{}/fileregex/settings", assignment_id)
}

pub fn save_uri(assignment_id: Uuid, submission_id: Uuid) -> String {
    format!(
        "/api/assignments/{}/fileregex/submissions/{}/save",
        assignment_id, submission_id
    )
}

/// Settings form body with a file name rule and content rules given as
/// `(regex, matchmode, feedback)`.
pub fn settings_body(filename_regex: &str, content: &[(&str, &str, &str)]) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert(
        "assignsubmission_fileregex_filename_regex".into(),
        filename_regex.into(),
    );
    body.insert("assignsubmission_fileregex_filename_matchmode".into(), "1".into());
    body.insert("assignsubmission_fileregex_filename_feedback".into(), "".into());
    for (i, (regex, matchmode, feedback)) in content.iter().enumerate() {
        body.insert(
            format!("assignsubmission_fileregex_content[{}][regex]", i),
            (*regex).into(),
        );
        body.insert(
            format!("assignsubmission_fileregex_content[{}][matchmode]", i),
            (*matchmode).into(),
        );
        body.insert(
            format!("assignsubmission_fileregex_content[{}][feedback]", i),
            (*feedback).into(),
        );
    }
    serde_json::Value::Object(body)
}

pub async fn configure(state: &AppState, assignment_id: Uuid, body: serde_json::Value) {
    let (status, _) = send(state, "PUT", &settings_uri(assignment_id), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
}

pub async fn set_mimetypes(state: &AppState, value: &str) {
    let (status, _) = send(
        state,
        "PUT",
        "/api/admin/fileregex/mimetypes",
        Some(serde_json::json!({ "value": value })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
