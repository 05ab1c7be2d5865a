use super::*;
use crate::net::types::RoomStatus;

fn room(id: &str, paper_id: &str, paper_name: &str, author: &str) -> ChatRoom {
    serde_json::from_value(serde_json::json!({
        "_id": id,
        "paperId": paper_id,
        "paperName": paper_name,
        "userName": author,
        "status": "pending"
    }))
    .unwrap()
}

fn sample() -> Vec<ChatRoom> {
    vec![
        room("r1", "P-001", "Borrow Checking in Practice", "Ada Lovelace"),
        room("r2", "P-002", "Lock-free Queues", "Alan Turing"),
    ]
}

// =============================================================
// set_rooms / select
// =============================================================

#[test]
fn set_rooms_selects_first_when_nothing_active() {
    let mut state = RoomsState { loading: true, ..RoomsState::default() };
    state.set_rooms(sample());
    assert_eq!(state.active_id(), Some("r1"));
    assert!(!state.loading);
}

#[test]
fn set_rooms_keeps_active_room_when_still_listed() {
    let mut state = RoomsState::default();
    state.set_rooms(sample());
    assert!(state.select("r2"));
    state.set_rooms(sample());
    assert_eq!(state.active_id(), Some("r2"));
}

#[test]
fn set_rooms_with_empty_list_clears_active() {
    let mut state = RoomsState::default();
    state.set_rooms(sample());
    state.set_rooms(Vec::new());
    assert!(state.active().is_none());
}

#[test]
fn reselecting_active_room_is_noop() {
    let mut state = RoomsState::default();
    state.set_rooms(sample());
    assert!(!state.select("r1"));
    assert!(state.select("r2"));
    assert!(!state.select("r2"));
}

#[test]
fn selecting_unknown_room_is_rejected() {
    let mut state = RoomsState::default();
    state.set_rooms(sample());
    assert!(!state.select("nope"));
    assert_eq!(state.active_id(), Some("r1"));
}

#[test]
fn set_error_stops_loading() {
    let mut state = RoomsState { loading: true, ..RoomsState::default() };
    state.set_error("Failed to fetch chatrooms".to_owned());
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Failed to fetch chatrooms"));
}

// =============================================================
// filtering
// =============================================================

#[test]
fn filter_matches_paper_name_id_and_author_for_reviewer() {
    let mut state = RoomsState::default();
    state.set_rooms(sample());

    state.filter = "lock-FREE".to_owned();
    assert_eq!(state.filtered(Role::Reviewer).iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["r2"]);

    state.filter = "p-001".to_owned();
    assert_eq!(state.filtered(Role::Reviewer).len(), 1);

    state.filter = "turing".to_owned();
    assert_eq!(state.filtered(Role::Reviewer)[0].id, "r2");
}

#[test]
fn filter_for_author_uses_reviewer_name() {
    let mut rooms = sample();
    rooms[0].reviewer_name = Some("Grace Hopper".to_owned());
    let mut state = RoomsState::default();
    state.set_rooms(rooms);

    state.filter = "hopper".to_owned();
    assert_eq!(state.filtered(Role::Author).len(), 1);
    state.filter = "turing".to_owned();
    assert!(state.filtered(Role::Author).is_empty());
}

#[test]
fn blank_filter_keeps_everything() {
    let mut state = RoomsState::default();
    state.set_rooms(sample());
    state.filter = "  ".to_owned();
    assert_eq!(state.filtered(Role::Author).len(), 2);
}

#[test]
fn active_returns_room_metadata() {
    let mut rooms = sample();
    rooms[1].status = RoomStatus::Declined;
    let mut state = RoomsState::default();
    state.set_rooms(rooms);
    state.select("r2");
    assert_eq!(state.active().map(|r| r.status), Some(RoomStatus::Declined));
}

// =============================================================
// list fetches
// =============================================================

#[test]
fn superseded_list_fetch_is_dropped() {
    let mut state = RoomsState::default();
    let first = state.begin_load();
    let second = state.begin_load();

    assert_eq!(state.finish_load(second, Ok(sample())), LoadOutcome::Applied(2));
    assert_eq!(state.finish_load(first, Ok(vec![room("old", "P-9", "Stale", "Nobody")])), LoadOutcome::Stale);
    assert_eq!(state.rooms.len(), 2);
    assert_eq!(state.active_id(), Some("r1"));
}

#[test]
fn older_failure_does_not_overwrite_newer_fetch() {
    let mut state = RoomsState::default();
    let first = state.begin_load();
    let second = state.begin_load();
    let err = ApiError::Transport("offline".to_owned());

    assert_eq!(state.finish_load(first, Err(err)), LoadOutcome::Stale);
    assert!(state.loading);
    assert!(state.error.is_none());

    let err = ApiError::Rejected("Failed to fetch chatrooms".to_owned());
    assert_eq!(state.finish_load(second, Err(err.clone())), LoadOutcome::Failed(err));
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Failed to fetch chatrooms"));
}
