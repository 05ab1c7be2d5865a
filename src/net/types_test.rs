use super::*;

// =============================================================
// Role
// =============================================================

#[test]
fn role_serializes_as_backend_flag() {
    assert_eq!(serde_json::to_value(Role::Author).unwrap(), serde_json::json!("user"));
    assert_eq!(serde_json::to_value(Role::Reviewer).unwrap(), serde_json::json!("reviewer"));
    let parsed: Role = serde_json::from_value(serde_json::json!("user")).unwrap();
    assert_eq!(parsed, Role::Author);
}

#[test]
fn role_from_flag_accepts_known_values_only() {
    assert_eq!(Role::from_flag("user"), Some(Role::Author));
    assert_eq!(Role::from_flag(" reviewer "), Some(Role::Reviewer));
    assert_eq!(Role::from_flag("admin"), None);
    assert_eq!(Role::from_flag(""), None);
}

#[test]
fn role_paths_and_labels() {
    assert_eq!(Role::Author.as_str(), "user");
    assert_eq!(Role::Author.home_path(), "/author");
    assert_eq!(Role::Reviewer.home_path(), "/reviewer");
    assert_eq!(Role::Author.counterpart_label(), "reviewer");
    assert_eq!(Role::Reviewer.counterpart_label(), "submitter");
}

// =============================================================
// RoomStatus
// =============================================================

#[test]
fn only_pending_rooms_accept_messages() {
    assert!(RoomStatus::Pending.accepts_messages());
    assert!(!RoomStatus::Completed.accepts_messages());
    assert!(!RoomStatus::Declined.accepts_messages());
}

// =============================================================
// Message / ChatRoom / Submission
// =============================================================

#[test]
fn message_parses_wire_fields() {
    let msg: Message = serde_json::from_value(serde_json::json!({
        "_id": "m1",
        "message": "hello",
        "sender_type": "reviewer",
        "createdAt": "2025-03-01T10:00:00.000Z"
    }))
    .unwrap();
    assert_eq!(msg.id.as_deref(), Some("m1"));
    assert_eq!(msg.text, "hello");
    assert_eq!(msg.sender, Role::Reviewer);
}

#[test]
fn message_without_id_serializes_without_id_field() {
    let msg = Message {
        id: None,
        text: "hi".to_owned(),
        sender: Role::Author,
        created_at: "t".to_owned(),
    };
    let value = serde_json::to_value(&msg).unwrap();
    assert!(value.get("_id").is_none());
    assert_eq!(value["sender_type"], "user");
}

#[test]
fn chat_room_parses_with_missing_optionals() {
    let room: ChatRoom = serde_json::from_value(serde_json::json!({
        "_id": "r1",
        "paperId": "P-7",
        "paperName": "Rust at Scale",
        "teamSize": "3",
        "userName": "Ada",
        "status": "completed"
    }))
    .unwrap();
    assert_eq!(room.id, "r1");
    assert_eq!(room.team_size, 3);
    assert_eq!(room.author_name, "Ada");
    assert_eq!(room.status, RoomStatus::Completed);
    assert!(room.reviewer_name.is_none());
    assert!(room.theme.is_empty());
}

#[test]
fn counterparty_depends_on_role() {
    let mut room: ChatRoom = serde_json::from_value(serde_json::json!({
        "_id": "r1",
        "userName": "Ada",
        "teamName": "Lambdas"
    }))
    .unwrap();
    assert_eq!(room.counterparty_name(Role::Reviewer), Some("Ada"));
    assert_eq!(room.counterparty_name(Role::Author), Some("Lambdas"));
    room.reviewer_name = Some("Dr. Grace".to_owned());
    assert_eq!(room.counterparty_name(Role::Author), Some("Dr. Grace"));
}

#[test]
fn submission_parses_camel_case() {
    let sub: Submission = serde_json::from_value(serde_json::json!({
        "_id": "s1",
        "paperId": "P-7",
        "userId": "u1",
        "fileUrl": "/uploads/a.pdf",
        "accepted": true,
        "createdAt": "c",
        "updatedAt": "u"
    }))
    .unwrap();
    assert_eq!(sub.file_url, "/uploads/a.pdf");
    assert!(sub.accepted);
}

// =============================================================
// Envelopes
// =============================================================

#[test]
fn ack_success_is_ok() {
    let ack: Ack = serde_json::from_value(serde_json::json!({ "success": true })).unwrap();
    assert!(ack.into_result("x").is_ok());
}

#[test]
fn ack_success_false_uses_server_message() {
    let ack: Ack = serde_json::from_value(serde_json::json!({ "success": false, "message": "nope" })).unwrap();
    assert_eq!(ack.into_result("fallback"), Err(ApiError::Rejected("nope".to_owned())));
}

#[test]
fn ack_success_false_without_message_uses_fallback() {
    let ack: Ack = serde_json::from_value(serde_json::json!({ "success": false })).unwrap();
    assert_eq!(ack.into_result("Failed to send message"), Err(ApiError::Rejected("Failed to send message".to_owned())));
}

#[test]
fn ack_non_200_code_is_rejected() {
    let ack: Ack = serde_json::from_value(serde_json::json!({ "code": 401, "msg": "Invalid credentials" })).unwrap();
    assert_eq!(ack.into_result("Login failed"), Err(ApiError::Rejected("Invalid credentials".to_owned())));
}

#[test]
fn ack_code_200_is_ok() {
    let ack: Ack = serde_json::from_value(serde_json::json!({ "code": 200 })).unwrap();
    assert!(ack.into_result("Login failed").is_ok());
}

#[test]
fn profile_resolves_unique_id_and_requested_role() {
    let env: ProfileEnvelope = serde_json::from_value(serde_json::json!({
        "user": { "uniqueId": "INF-1", "email": "a@b.com", "name": "Ada" }
    }))
    .unwrap();
    let user = env.into_user(Role::Author).unwrap();
    assert_eq!(user.id, "INF-1");
    assert_eq!(user.role, Role::Author);
    assert_eq!(user.display_name(), "Ada");
}

#[test]
fn profile_prefers_role_from_payload() {
    let env: ProfileEnvelope = serde_json::from_value(serde_json::json!({
        "user": { "id": "r9", "email": "r@b.com", "role": "reviewer" }
    }))
    .unwrap();
    let user = env.into_user(Role::Author).unwrap();
    assert_eq!(user.role, Role::Reviewer);
    assert_eq!(user.display_name(), "r@b.com");
}

#[test]
fn profile_without_user_is_none() {
    let env: ProfileEnvelope = serde_json::from_value(serde_json::json!({})).unwrap();
    assert!(env.into_user(Role::Reviewer).is_none());
}
