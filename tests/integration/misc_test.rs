//! Integration tests for dispatch, PutRelativeFile, share URLs, user info,
//! restricted links, secure store, and activities.

mod helpers;

use bytes::Bytes;
use http::StatusCode;

async fn app_with_doc() -> (helpers::TestApp, String) {
    let app = helpers::TestApp::new().await;
    app.seed_file("doc.docx", b"document body");
    let token = app.token_for("alice", "doc.docx");
    (app, token)
}

#[tokio::test]
async fn a_missing_override_is_a_server_error() {
    let (app, token) = app_with_doc().await;

    let response = app
        .request(
            "POST",
            &format!("/wopi/files/doc.docx?access_token={token}"),
            &[],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn an_unknown_override_is_a_server_error() {
    let (app, token) = app_with_doc().await;

    let response = app
        .request(
            "POST",
            &format!("/wopi/files/doc.docx?access_token={token}"),
            &[("X-WOPI-Override", "FROBNICATE")],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn cobalt_is_unsupported() {
    let (app, token) = app_with_doc().await;

    let response = app
        .request(
            "POST",
            &format!("/wopi/files/doc.docx?access_token={token}"),
            &[("X-WOPI-Override", "COBALT")],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn user_info_round_trips_into_check_file_info() {
    let (app, token) = app_with_doc().await;

    let response = app
        .request(
            "POST",
            &format!("/wopi/files/doc.docx?access_token={token}"),
            &[("X-WOPI-Override", "PUT_USER_INFO")],
            Some(Bytes::from_static(b"prefers dark mode")),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/wopi/files/doc.docx?access_token={token}"),
            &[],
            None,
        )
        .await;
    assert_eq!(response.json()["UserInfo"], "prefers dark mode");
}

#[tokio::test]
async fn share_url_requires_a_known_url_type() {
    let (app, token) = app_with_doc().await;
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    for url_type in ["ReadOnly", "ReadWrite"] {
        let response = app
            .request(
                "POST",
                &path,
                &[
                    ("X-WOPI-Override", "GET_SHARE_URL"),
                    ("X-WOPI-UrlType", url_type),
                ],
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        let url = response.json()["ShareUrl"].as_str().unwrap().to_string();
        assert!(url.contains("access_token="));
    }

    let response = app
        .request(
            "POST",
            &path,
            &[
                ("X-WOPI-Override", "GET_SHARE_URL"),
                ("X-WOPI-UrlType", "Whatever"),
            ],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn restricted_links_revoke_to_empty() {
    let (app, token) = app_with_doc().await;
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    let response = app
        .request(
            "POST",
            &path,
            &[
                ("X-WOPI-Override", "GET_RESTRICTED_LINK"),
                ("X-WOPI-RestrictedUseLink", "FORMS"),
            ],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header("X-WOPI-RestrictedUseLink"),
        Some("http://officeserver4/restricted/doc.docx")
    );

    let response = app
        .request(
            "POST",
            &path,
            &[
                ("X-WOPI-Override", "REVOKE_RESTRICTED_LINK"),
                ("X-WOPI-RestrictedUseLink", "FORMS"),
            ],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            &path,
            &[
                ("X-WOPI-Override", "GET_RESTRICTED_LINK"),
                ("X-WOPI-RestrictedUseLink", "FORMS"),
            ],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("X-WOPI-RestrictedUseLink"), Some(""));
}

#[tokio::test]
async fn restricted_links_require_the_forms_scenario() {
    let (app, token) = app_with_doc().await;
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    for op in ["GET_RESTRICTED_LINK", "REVOKE_RESTRICTED_LINK"] {
        let response = app
            .request("POST", &path, &[("X-WOPI-Override", op)], None)
            .await;
        assert_eq!(response.status, StatusCode::NOT_IMPLEMENTED);
    }
}

#[tokio::test]
async fn secure_store_returns_fixed_credentials() {
    let (app, token) = app_with_doc().await;
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    let response = app
        .request(
            "POST",
            &path,
            &[
                ("X-WOPI-Override", "READ_SECURE_STORE"),
                ("X-WOPI-ApplicationId", "app-1"),
            ],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert!(body["UserName"].is_string());
    assert!(body["Password"].is_string());
    assert_eq!(body["IsWindowsCredentials"], true);
    assert_eq!(body["IsGroup"], false);
    assert!(response.header("X-WOPI-PerfTrace").is_none());
}

#[tokio::test]
async fn secure_store_perf_trace_and_missing_application_id() {
    let (app, token) = app_with_doc().await;
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    let response = app
        .request(
            "POST",
            &path,
            &[
                ("X-WOPI-Override", "READ_SECURE_STORE"),
                ("X-WOPI-ApplicationId", "app-1"),
                ("X-WOPI-PerfTraceRequested", "true"),
            ],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.header("X-WOPI-PerfTrace").is_some());

    let response = app
        .request(
            "POST",
            &path,
            &[("X-WOPI-Override", "READ_SECURE_STORE")],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn add_activities_acknowledges_each_in_order() {
    let (app, token) = app_with_doc().await;

    let payload = serde_json::json!({
        "Activities": [
            {
                "Type": "Comment",
                "Id": "act-1",
                "Timestamp": "2024-05-01T10:00:00Z",
                "Data": { "ContentId": "c1", "ContentAction": "Added" }
            },
            {
                "Type": "Edit",
                "Id": "act-2",
                "Timestamp": "2024-05-01T10:01:00Z",
                "Data": { "ContentId": "c2", "ContentAction": "Changed" }
            }
        ]
    });

    let response = app
        .request(
            "POST",
            &format!("/wopi/files/doc.docx?access_token={token}"),
            &[("X-WOPI-Override", "ADD_ACTIVITIES")],
            Some(Bytes::from(payload.to_string())),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    let acks = body["ActivityResponses"].as_array().expect("acks");
    assert_eq!(acks.len(), 2);
    assert_eq!(acks[0]["Id"], "act-1");
    assert_eq!(acks[1]["Id"], "act-2");
    for ack in acks {
        assert_eq!(ack["Status"], 0);
        assert_eq!(ack["Message"], "");
    }
}

#[tokio::test]
async fn put_relative_with_a_suggested_extension_swap() {
    let (app, token) = app_with_doc().await;

    let response = app
        .request(
            "POST",
            &format!("/wopi/files/doc.docx?access_token={token}"),
            &[
                ("X-WOPI-Override", "PUT_RELATIVE"),
                ("X-WOPI-SuggestedTarget", ".pdf"),
            ],
            Some(Bytes::from_static(b"%PDF-1.7")),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let body = response.json();
    assert_eq!(body["Name"], "doc.pdf");
    for field in ["Url", "HostViewUrl", "HostEditUrl"] {
        let url = body[field].as_str().expect("url field");
        assert!(url.contains("access_token="));
        assert!(url.contains("/wopi/files/"));
    }

    let new_token = app.token_for("alice", "doc.pdf");
    let response = app
        .request(
            "GET",
            &format!("/wopi/files/doc.pdf/contents?access_token={new_token}"),
            &[],
            None,
        )
        .await;
    assert_eq!(&response.body[..], b"%PDF-1.7");
}

#[tokio::test]
async fn put_relative_suggested_target_dodges_collisions() {
    let (app, token) = app_with_doc().await;
    app.seed_file("copy.docx", b"already here");

    let response = app
        .request(
            "POST",
            &format!("/wopi/files/doc.docx?access_token={token}"),
            &[
                ("X-WOPI-Override", "PUT_RELATIVE"),
                ("X-WOPI-SuggestedTarget", "copy.docx"),
            ],
            Some(Bytes::from_static(b"fresh")),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let name = response.json()["Name"].as_str().unwrap().to_string();
    assert_ne!(name, "copy.docx");
    assert!(name.ends_with("copy.docx"));
}

#[tokio::test]
async fn put_relative_relative_target_conflicts_without_overwrite() {
    let (app, token) = app_with_doc().await;
    app.seed_file("exact.docx", b"already here");
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    let response = app
        .request(
            "POST",
            &path,
            &[
                ("X-WOPI-Override", "PUT_RELATIVE"),
                ("X-WOPI-RelativeTarget", "exact.docx"),
            ],
            Some(Bytes::from_static(b"fresh")),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.header("X-WOPI-Lock"), Some(""));

    let response = app
        .request(
            "POST",
            &path,
            &[
                ("X-WOPI-Override", "PUT_RELATIVE"),
                ("X-WOPI-RelativeTarget", "exact.docx"),
                ("X-WOPI-OverwriteRelativeTarget", "true"),
            ],
            Some(Bytes::from_static(b"fresh")),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["Name"], "exact.docx");
}

#[tokio::test]
async fn put_relative_cannot_overwrite_a_locked_target() {
    let (app, token) = app_with_doc().await;
    app.seed_file("exact.docx", b"already here");

    let target_token = app.token_for("alice", "exact.docx");
    app.request(
        "POST",
        &format!("/wopi/files/exact.docx?access_token={target_token}"),
        &[("X-WOPI-Override", "LOCK"), ("X-WOPI-Lock", "held")],
        None,
    )
    .await;

    let response = app
        .request(
            "POST",
            &format!("/wopi/files/doc.docx?access_token={token}"),
            &[
                ("X-WOPI-Override", "PUT_RELATIVE"),
                ("X-WOPI-RelativeTarget", "exact.docx"),
                ("X-WOPI-OverwriteRelativeTarget", "true"),
            ],
            Some(Bytes::from_static(b"fresh")),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.header("X-WOPI-Lock"), Some("held"));
}

#[tokio::test]
async fn put_relative_requires_exactly_one_target_header() {
    let (app, token) = app_with_doc().await;
    let path = format!("/wopi/files/doc.docx?access_token={token}");

    let response = app
        .request(
            "POST",
            &path,
            &[("X-WOPI-Override", "PUT_RELATIVE")],
            Some(Bytes::from_static(b"fresh")),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_IMPLEMENTED);

    let response = app
        .request(
            "POST",
            &path,
            &[
                ("X-WOPI-Override", "PUT_RELATIVE"),
                ("X-WOPI-SuggestedTarget", "a.docx"),
                ("X-WOPI-RelativeTarget", "b.docx"),
            ],
            Some(Bytes::from_static(b"fresh")),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn put_relative_decodes_percent_encoded_targets() {
    let (app, token) = app_with_doc().await;

    let response = app
        .request(
            "POST",
            &format!("/wopi/files/doc.docx?access_token={token}"),
            &[
                ("X-WOPI-Override", "PUT_RELATIVE"),
                ("X-WOPI-RelativeTarget", "annual%20report.docx"),
            ],
            Some(Bytes::from_static(b"fresh")),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["Name"], "annual report.docx");
}
