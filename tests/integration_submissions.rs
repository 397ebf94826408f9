mod common;

use axum::http::StatusCode;
use common::{
    area_files, configure, save_uri, send, set_mimetypes, settings_body, submit_file, test_state,
    zip_bytes,
};
use fileregex::fileregex_config::PluginOrderConfig;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const MAIN_C: &[u8] = b"#include <stdio.h>\nint main(void) {\n    return 0;\n}\n";

fn c_program_rules() -> serde_json::Value {
    settings_body(
        r"\.c$",
        &[
            ("int main", "1", "Function main() not found"),
            (r"system\(", "0", ""),
        ],
    )
}

#[sqlx::test(migrations = "./migrations")]
async fn test_valid_file_is_accepted(pool: PgPool) {
    let (state, dir) = test_state(pool, PluginOrderConfig::default());
    let (assignment_id, submission_id) = (Uuid::new_v4(), Uuid::new_v4());
    configure(&state, assignment_id, c_program_rules()).await;
    submit_file(&dir, assignment_id, submission_id, "main.c", MAIN_C).await;

    let (status, body) = send(&state, "POST", &save_uri(assignment_id, submission_id), Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], true);
    assert!(body["feedback"].is_null());
    assert_eq!(body["submission_empty"], true);
    assert_eq!(body["offer_bypass"], false);
    assert_eq!(area_files(&state, assignment_id, submission_id).await.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_content_rule_failure_deletes_file(pool: PgPool) {
    let (state, dir) = test_state(pool, PluginOrderConfig::default());
    let (assignment_id, submission_id) = (Uuid::new_v4(), Uuid::new_v4());
    configure(&state, assignment_id, c_program_rules()).await;
    submit_file(&dir, assignment_id, submission_id, "main.c", b"void helper(void) {}\n").await;

    let (status, body) = send(&state, "POST", &save_uri(assignment_id, submission_id), Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], false);
    assert_eq!(body["feedback"], "Function main() not found");
    assert_eq!(body["submission_empty"], false);
    assert_eq!(body["offer_bypass"], true);
    assert!(area_files(&state, assignment_id, submission_id).await.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_must_not_match_rule_uses_default_feedback(pool: PgPool) {
    let (state, dir) = test_state(pool, PluginOrderConfig::default());
    let (assignment_id, submission_id) = (Uuid::new_v4(), Uuid::new_v4());
    configure(&state, assignment_id, c_program_rules()).await;
    submit_file(
        &dir,
        assignment_id,
        submission_id,
        "main.c",
        b"int main(void) { system(\"rm -rf /\"); }\n",
    )
    .await;

    let (_, body) = send(&state, "POST", &save_uri(assignment_id, submission_id), Some(json!({}))).await;

    assert_eq!(body["accepted"], false);
    assert_eq!(
        body["feedback"],
        "The file content does not pass the content validation rules."
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_filename_rule_failure(pool: PgPool) {
    let (state, dir) = test_state(pool, PluginOrderConfig::default());
    let (assignment_id, submission_id) = (Uuid::new_v4(), Uuid::new_v4());
    configure(&state, assignment_id, c_program_rules()).await;
    submit_file(&dir, assignment_id, submission_id, "main.py", b"int main").await;

    let (_, body) = send(&state, "POST", &save_uri(assignment_id, submission_id), Some(json!({}))).await;

    assert_eq!(body["accepted"], false);
    assert_eq!(body["feedback"], "The file name is not valid.");
    assert!(area_files(&state, assignment_id, submission_id).await.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bypass_accepts_invalid_file(pool: PgPool) {
    let (state, dir) = test_state(pool, PluginOrderConfig::default());
    let (assignment_id, submission_id) = (Uuid::new_v4(), Uuid::new_v4());
    configure(&state, assignment_id, c_program_rules()).await;
    submit_file(&dir, assignment_id, submission_id, "notes.txt", b"nothing").await;

    let (status, body) = send(
        &state,
        "POST",
        &save_uri(assignment_id, submission_id),
        Some(json!({ "assignsubmission_fileregex_bypass": true })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], true);
    assert_eq!(area_files(&state, assignment_id, submission_id).await.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_file_name_with_spaces_and_parentheses(pool: PgPool) {
    let (state, dir) = test_state(pool, PluginOrderConfig::default());
    let assignment_id = Uuid::new_v4();
    configure(&state, assignment_id, c_program_rules()).await;

    let valid = Uuid::new_v4();
    submit_file(&dir, assignment_id, valid, "main (1).c", MAIN_C).await;
    let (status, body) = send(&state, "POST", &save_uri(assignment_id, valid), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], true);
    assert_eq!(area_files(&state, assignment_id, valid).await.len(), 1);

    let invalid = Uuid::new_v4();
    submit_file(&dir, assignment_id, invalid, "main (1).c", b"void helper(void) {}\n").await;
    let (status, body) = send(&state, "POST", &save_uri(assignment_id, invalid), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], false);
    assert_eq!(body["feedback"], "Function main() not found");
    assert!(area_files(&state, assignment_id, invalid).await.is_empty());

    let bypassed = Uuid::new_v4();
    submit_file(&dir, assignment_id, bypassed, "main (1).c", b"void helper(void) {}\n").await;
    let (status, body) = send(
        &state,
        "POST",
        &save_uri(assignment_id, bypassed),
        Some(json!({ "assignsubmission_fileregex_bypass": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], true);
    assert_eq!(area_files(&state, assignment_id, bypassed).await.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_zip_entry_larger_than_file_limit_is_rejected(pool: PgPool) {
    let (state, dir) = test_state(pool, PluginOrderConfig::default());
    let (assignment_id, submission_id) = (Uuid::new_v4(), Uuid::new_v4());
    configure(&state, assignment_id, settings_body("", &[])).await;
    let expanded = vec![b'a'; state.max_file_size + 1];
    let archive = zip_bytes(&[("notes.txt", &expanded)]);
    assert!(archive.len() < state.max_file_size);
    submit_file(&dir, assignment_id, submission_id, "submission.zip", &archive).await;

    let (status, body) = send(&state, "POST", &save_uri(assignment_id, submission_id), Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], false);
    assert_eq!(
        body["feedback"],
        "The zip file should not contain more than one file."
    );
    assert!(area_files(&state, assignment_id, submission_id).await.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_misordered_plugin_accepts_everything(pool: PgPool) {
    let order = PluginOrderConfig {
        file_sortorder: 2,
        fileregex_sortorder: 2,
    };
    let (state, dir) = test_state(pool, order);
    let (assignment_id, submission_id) = (Uuid::new_v4(), Uuid::new_v4());
    configure(&state, assignment_id, c_program_rules()).await;
    submit_file(&dir, assignment_id, submission_id, "notes.txt", b"nothing").await;

    let (_, body) = send(&state, "POST", &save_uri(assignment_id, submission_id), Some(json!({}))).await;

    assert_eq!(body["accepted"], true);
    assert_eq!(area_files(&state, assignment_id, submission_id).await.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_no_file_or_several_files_are_accepted(pool: PgPool) {
    let (state, dir) = test_state(pool, PluginOrderConfig::default());
    let assignment_id = Uuid::new_v4();
    configure(&state, assignment_id, c_program_rules()).await;

    let empty_submission = Uuid::new_v4();
    let (_, body) = send(&state, "POST", &save_uri(assignment_id, empty_submission), Some(json!({}))).await;
    assert_eq!(body["accepted"], true);

    let multi_submission = Uuid::new_v4();
    submit_file(&dir, assignment_id, multi_submission, "a.txt", b"a").await;
    submit_file(&dir, assignment_id, multi_submission, "b.txt", b"b").await;
    let (_, body) = send(&state, "POST", &save_uri(assignment_id, multi_submission), Some(json!({}))).await;
    assert_eq!(body["accepted"], true);
    assert_eq!(area_files(&state, assignment_id, multi_submission).await.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unconfigured_instance_accepts(pool: PgPool) {
    let (state, dir) = test_state(pool, PluginOrderConfig::default());
    let (assignment_id, submission_id) = (Uuid::new_v4(), Uuid::new_v4());
    submit_file(&dir, assignment_id, submission_id, "anything.bin", b"\x00\x01").await;

    let (_, body) = send(&state, "POST", &save_uri(assignment_id, submission_id), Some(json!({}))).await;

    assert_eq!(body["accepted"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_zip_with_single_entry_is_validated_on_inner_file(pool: PgPool) {
    let (state, dir) = test_state(pool, PluginOrderConfig::default());
    let (assignment_id, submission_id) = (Uuid::new_v4(), Uuid::new_v4());
    configure(&state, assignment_id, c_program_rules()).await;
    set_mimetypes(&state, "text/plain").await;
    let archive = zip_bytes(&[("main.c", MAIN_C)]);
    submit_file(&dir, assignment_id, submission_id, "submission.zip", &archive).await;

    let (_, body) = send(&state, "POST", &save_uri(assignment_id, submission_id), Some(json!({}))).await;

    assert_eq!(body["accepted"], true);
    assert_eq!(area_files(&state, assignment_id, submission_id).await.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_zip_with_several_entries_is_rejected(pool: PgPool) {
    let (state, dir) = test_state(pool, PluginOrderConfig::default());
    let (assignment_id, submission_id) = (Uuid::new_v4(), Uuid::new_v4());
    configure(&state, assignment_id, c_program_rules()).await;
    let archive = zip_bytes(&[("main.c", MAIN_C), ("util.c", b"int x;")]);
    submit_file(&dir, assignment_id, submission_id, "submission.zip", &archive).await;

    let (_, body) = send(&state, "POST", &save_uri(assignment_id, submission_id), Some(json!({}))).await;

    assert_eq!(body["accepted"], false);
    assert_eq!(
        body["feedback"],
        "The zip file should not contain more than one file."
    );
    assert!(area_files(&state, assignment_id, submission_id).await.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unsupported_mimetype_is_rejected(pool: PgPool) {
    let (state, dir) = test_state(pool, PluginOrderConfig::default());
    let (assignment_id, submission_id) = (Uuid::new_v4(), Uuid::new_v4());
    configure(&state, assignment_id, settings_body("", &[("int main", "1", "")])).await;
    set_mimetypes(&state, "text/plain\n# images are never parseable\n").await;
    submit_file(&dir, assignment_id, submission_id, "main.pdf", b"%PDF-1.4 int main").await;

    let (_, body) = send(&state, "POST", &save_uri(assignment_id, submission_id), Some(json!({}))).await;

    assert_eq!(body["accepted"], false);
    assert_eq!(body["feedback"], "This type of file is not supported.");
    assert!(area_files(&state, assignment_id, submission_id).await.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_form_elements_offer_bypass_checkbox(pool: PgPool) {
    let (state, _dir) = test_state(pool, PluginOrderConfig::default());
    let base = format!(
        "/api/assignments/{}/fileregex/submissions/{}/form",
        Uuid::new_v4(),
        Uuid::new_v4()
    );

    let (status, body) = send(&state, "GET", &format!("{}?bypass=true", base), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bypass"]["name"], "assignsubmission_fileregex_bypass");

    let (_, body) = send(&state, "GET", &base, None).await;
    assert!(body["bypass"].is_null());
}
