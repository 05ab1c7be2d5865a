use super::*;

fn room(json: serde_json::Value) -> ChatRoom {
    serde_json::from_value(json).unwrap()
}

#[test]
fn message_dom_id_is_index_based() {
    assert_eq!(message_dom_id(3), "chat-msg-3");
}

#[test]
fn empty_state_names_the_counterpart() {
    assert_eq!(empty_state_text(Role::Author), "No messages yet. Start the conversation with your reviewer.");
    assert_eq!(empty_state_text(Role::Reviewer), "No messages yet. Start the conversation with your submitter.");
}

#[test]
fn closed_room_text_names_status() {
    assert_eq!(closed_room_text(RoomStatus::Declined), "Chat is declined. No new messages can be sent.");
}

#[test]
fn sender_label_marks_own_messages() {
    let msg = Message { id: None, text: "hi".to_owned(), sender: Role::Author, created_at: String::new() };
    assert_eq!(sender_label(&msg, Role::Author), "You");
    assert_eq!(sender_label(&msg, Role::Reviewer), "Author");
}

#[test]
fn reviewer_details_include_author_contact() {
    let r = room(serde_json::json!({
        "_id": "r1",
        "paperName": "Borrow Checking",
        "userName": "Ada",
        "userEmail": "ada@example.com",
        "teamSize": "3"
    }));
    let rows = detail_rows(&r, Role::Reviewer);
    assert!(rows.contains(&("Author", "Ada".to_owned())));
    assert!(rows.contains(&("Author Email", "ada@example.com".to_owned())));
    assert!(rows.contains(&("Team Size", "3".to_owned())));
    assert!(!rows.iter().any(|(label, _)| *label == "Reviewer"));
}

#[test]
fn author_details_show_unassigned_reviewer() {
    let r = room(serde_json::json!({ "_id": "r1", "reviewerName": "  " }));
    let rows = detail_rows(&r, Role::Author);
    assert!(rows.contains(&("Reviewer", "Not Assigned".to_owned())));
    assert!(!rows.iter().any(|(label, _)| *label == "Author Email"));
}

fn loaded_chat(texts: &[&str]) -> ChatState {
    let mut chat = ChatState::default();
    let ticket = chat.open_room("r1").unwrap();
    let list = texts
        .iter()
        .map(|text| Message { id: None, text: (*text).to_owned(), sender: Role::Reviewer, created_at: String::new() })
        .collect();
    chat.messages.finish_load(&ticket, Ok(list));
    chat
}

#[test]
fn typing_leaves_transcript_unchanged() {
    let mut chat = loaded_chat(&["hi", "hello world"]);
    let before = transcript_of(&chat);

    chat.input = "draft".to_owned();
    chat.search.set_visible(true);
    chat.search.set_query("hel");
    assert_eq!(transcript_of(&chat), before);
    assert_eq!(before.messages.len(), 2);
    assert_eq!(before.highlight, None);
}

#[test]
fn find_next_moves_transcript_highlight() {
    let mut chat = loaded_chat(&["hi", "hello world"]);
    chat.search.set_query("hello");
    chat.search.find_next(chat.messages.messages());
    assert_eq!(transcript_of(&chat).highlight, Some(1));
}
