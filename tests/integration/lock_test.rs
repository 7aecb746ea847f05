//! Integration tests for the WOPI lock protocol.

mod helpers;

use http::StatusCode;

async fn app_with_doc() -> (helpers::TestApp, String) {
    let app = helpers::TestApp::new().await;
    app.seed_file("doc.docx", b"document body");
    let token = app.token_for("alice", "doc.docx");
    (app, token)
}

#[tokio::test]
async fn lock_then_get_lock_round_trips() {
    let (app, token) = app_with_doc().await;
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    let response = app
        .request(
            "POST",
            &path,
            &[("X-WOPI-Override", "LOCK"), ("X-WOPI-Lock", "L1")],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.header("X-WOPI-ItemVersion").is_some());

    let response = app
        .request("POST", &path, &[("X-WOPI-Override", "GET_LOCK")], None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("X-WOPI-Lock"), Some("L1"));
}

#[tokio::test]
async fn conflicting_lock_returns_the_current_one() {
    let (app, token) = app_with_doc().await;
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    app.request(
        "POST",
        &path,
        &[("X-WOPI-Override", "LOCK"), ("X-WOPI-Lock", "L1")],
        None,
    )
    .await;

    let response = app
        .request(
            "POST",
            &path,
            &[("X-WOPI-Override", "LOCK"), ("X-WOPI-Lock", "L2")],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.header("X-WOPI-Lock"), Some("L1"));
}

#[tokio::test]
async fn relocking_with_the_same_string_succeeds() {
    let (app, token) = app_with_doc().await;
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    for _ in 0..2 {
        let response = app
            .request(
                "POST",
                &path,
                &[("X-WOPI-Override", "LOCK"), ("X-WOPI-Lock", "L1")],
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn unlock_releases_and_get_lock_reads_empty() {
    let (app, token) = app_with_doc().await;
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    app.request(
        "POST",
        &path,
        &[("X-WOPI-Override", "LOCK"), ("X-WOPI-Lock", "L1")],
        None,
    )
    .await;

    let response = app
        .request(
            "POST",
            &path,
            &[("X-WOPI-Override", "UNLOCK"), ("X-WOPI-Lock", "L1")],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.header("X-WOPI-ItemVersion").is_some());

    let response = app
        .request("POST", &path, &[("X-WOPI-Override", "GET_LOCK")], None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("X-WOPI-Lock"), Some(""));
}

#[tokio::test]
async fn unlock_without_a_lock_is_a_conflict_with_reason() {
    let (app, token) = app_with_doc().await;
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    let response = app
        .request(
            "POST",
            &path,
            &[("X-WOPI-Override", "UNLOCK"), ("X-WOPI-Lock", "L1")],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.header("X-WOPI-Lock"), Some(""));
    assert_eq!(
        response.header("X-WOPI-LockFailureReason"),
        Some("File not locked")
    );
}

#[tokio::test]
async fn unlock_with_the_wrong_string_is_a_mismatch() {
    let (app, token) = app_with_doc().await;
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    app.request(
        "POST",
        &path,
        &[("X-WOPI-Override", "LOCK"), ("X-WOPI-Lock", "L1")],
        None,
    )
    .await;

    let response = app
        .request(
            "POST",
            &path,
            &[("X-WOPI-Override", "UNLOCK"), ("X-WOPI-Lock", "wrong")],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.header("X-WOPI-Lock"), Some("L1"));
}

#[tokio::test]
async fn refresh_lock_requires_a_match() {
    let (app, token) = app_with_doc().await;
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    let response = app
        .request(
            "POST",
            &path,
            &[("X-WOPI-Override", "REFRESH_LOCK"), ("X-WOPI-Lock", "L1")],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.header("X-WOPI-Lock"), Some(""));

    app.request(
        "POST",
        &path,
        &[("X-WOPI-Override", "LOCK"), ("X-WOPI-Lock", "L1")],
        None,
    )
    .await;

    let response = app
        .request(
            "POST",
            &path,
            &[("X-WOPI-Override", "REFRESH_LOCK"), ("X-WOPI-Lock", "L1")],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn unlock_and_relock_swaps_the_lock() {
    let (app, token) = app_with_doc().await;
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    app.request(
        "POST",
        &path,
        &[("X-WOPI-Override", "LOCK"), ("X-WOPI-Lock", "L1")],
        None,
    )
    .await;

    let response = app
        .request(
            "POST",
            &path,
            &[
                ("X-WOPI-Override", "LOCK"),
                ("X-WOPI-Lock", "L2"),
                ("X-WOPI-OldLock", "L1"),
            ],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("X-WOPI-OldLock"), Some("L2"));

    let response = app
        .request("POST", &path, &[("X-WOPI-Override", "GET_LOCK")], None)
        .await;
    assert_eq!(response.header("X-WOPI-Lock"), Some("L2"));
}

#[tokio::test]
async fn unlock_and_relock_with_the_wrong_old_lock_mismatches() {
    let (app, token) = app_with_doc().await;
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    app.request(
        "POST",
        &path,
        &[("X-WOPI-Override", "LOCK"), ("X-WOPI-Lock", "L1")],
        None,
    )
    .await;

    let response = app
        .request(
            "POST",
            &path,
            &[
                ("X-WOPI-Override", "LOCK"),
                ("X-WOPI-Lock", "L2"),
                ("X-WOPI-OldLock", "stale"),
            ],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.header("X-WOPI-Lock"), Some("L1"));
}

#[tokio::test]
async fn lock_on_a_missing_file_is_not_found() {
    let app = helpers::TestApp::new().await;
    let token = app.token_for("alice", "missing.docx");

    let response = app
        .request(
            "POST",
            &format!("/wopi/files/missing.docx?access_token={token}"),
            &[("X-WOPI-Override", "LOCK"), ("X-WOPI-Lock", "L1")],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lock_ids_are_case_insensitive() {
    let (app, _) = app_with_doc().await;
    let token = app.token_for("alice", "DOC.DOCX");

    let response = app
        .request(
            "POST",
            &format!("/wopi/files/DOC.DOCX?access_token={token}"),
            &[("X-WOPI-Override", "LOCK"), ("X-WOPI-Lock", "L1")],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let lower_token = app.token_for("alice", "doc.docx");
    let response = app
        .request(
            "POST",
            &format!("/wopi/files/doc.docx?access_token={lower_token}"),
            &[("X-WOPI-Override", "GET_LOCK")],
            None,
        )
        .await;
    assert_eq!(response.header("X-WOPI-Lock"), Some("L1"));
}
