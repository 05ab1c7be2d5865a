use super::*;

const BASE: &str = "http://localhost:5000";

#[test]
fn auth_endpoints_are_role_scoped() {
    assert_eq!(login_endpoint(BASE, Role::Author), "http://localhost:5000/api/auth/user/login");
    assert_eq!(login_endpoint(BASE, Role::Reviewer), "http://localhost:5000/api/auth/reviewer/login");
    assert_eq!(profile_endpoint(BASE, Role::Author), "http://localhost:5000/api/auth/user/profile");
    assert_eq!(profile_endpoint(BASE, Role::Reviewer), "http://localhost:5000/api/auth/reviewer/status");
    assert_eq!(logout_endpoint(BASE), "http://localhost:5000/api/auth/logout");
}

#[test]
fn event_endpoints_format_expected_paths() {
    assert_eq!(rooms_endpoint(BASE, Role::Reviewer), "http://localhost:5000/api/events/paper/reviewer/chats");
    assert_eq!(
        messages_endpoint(BASE, Role::Author, "r1"),
        "http://localhost:5000/api/events/paper/user/messages/r1"
    );
    assert_eq!(
        submissions_endpoint(BASE, Role::Author, "r1"),
        "http://localhost:5000/api/events/paper/user/submissions/r1"
    );
    assert_eq!(upload_endpoint(BASE, "P-7"), "http://localhost:5000/api/events/paper/P-7/upload");
}

#[test]
fn accept_endpoint_always_uses_reviewer_path() {
    assert_eq!(accept_endpoint(BASE, "r1"), "http://localhost:5000/api/events/paper/reviewer/submissions/r1");
}

#[test]
fn file_url_joins_relative_paths() {
    assert_eq!(file_url(BASE, "/uploads/a.pdf"), "http://localhost:5000/uploads/a.pdf");
    assert_eq!(file_url(BASE, "uploads/a.pdf"), "http://localhost:5000/uploads/a.pdf");
    assert_eq!(file_url(BASE, "https://cdn.test/a.pdf"), "https://cdn.test/a.pdf");
}

#[test]
fn send_message_payload_carries_role_flag() {
    let payload = send_message_payload(Role::Author, "hello", "2025-03-01T10:00:00.000Z");
    assert_eq!(
        payload,
        serde_json::json!({ "message": "hello", "sender": "user", "timestamp": "2025-03-01T10:00:00.000Z" })
    );
}

#[test]
fn login_payload_has_credentials() {
    assert_eq!(login_payload("a@b.com", "pw"), serde_json::json!({ "email": "a@b.com", "password": "pw" }));
}

#[test]
fn rooms_envelope_failure_is_rejected() {
    let env: RoomsEnvelope = serde_json::from_value(serde_json::json!({ "success": false })).unwrap();
    assert_eq!(rooms_from_envelope(env), Err(ApiError::Rejected("Failed to fetch chatrooms".to_owned())));
}

#[test]
fn rooms_envelope_success_without_chats_is_empty() {
    let env: RoomsEnvelope = serde_json::from_value(serde_json::json!({ "success": true })).unwrap();
    assert_eq!(rooms_from_envelope(env), Ok(Vec::new()));
}

#[test]
fn messages_envelope_success_returns_list() {
    let env: MessagesEnvelope = serde_json::from_value(serde_json::json!({
        "success": true,
        "messages": [{ "message": "hi", "sender_type": "user", "createdAt": "t" }]
    }))
    .unwrap();
    let list = messages_from_envelope(env).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].text, "hi");
}

#[test]
fn submissions_envelope_requires_success_and_list() {
    let missing: SubmissionsEnvelope = serde_json::from_value(serde_json::json!({ "success": true })).unwrap();
    assert!(submissions_from_envelope(missing).is_err());

    let ok: SubmissionsEnvelope = serde_json::from_value(serde_json::json!({
        "success": true,
        "submissions": [{ "_id": "s1", "fileUrl": "/f.pdf" }]
    }))
    .unwrap();
    assert_eq!(submissions_from_envelope(ok).unwrap()[0].id, "s1");
}

#[test]
fn calls_are_unavailable_outside_the_browser() {
    let result = futures::executor::block_on(fetch_rooms(Role::Author));
    assert_eq!(result, Err(ApiError::Unavailable));
}
