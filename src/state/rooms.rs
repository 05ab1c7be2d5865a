//! Room list, filter text, and the active room selection.
//!
//! DESIGN
//! ======
//! Selection is idempotent: re-selecting the active room reports "unchanged"
//! so downstream fetches, which key off the active id, are not repeated.
//! List fetches are numbered; only the latest one may install its result.

#[cfg(test)]
#[path = "rooms_test.rs"]
mod rooms_test;

use crate::error::ApiError;
use crate::net::types::{ChatRoom, Role};
use crate::state::load::LoadOutcome;

#[derive(Clone, Debug, Default)]
pub struct RoomsState {
    pub rooms: Vec<ChatRoom>,
    pub loading: bool,
    pub error: Option<String>,
    pub filter: String,
    active_id: Option<String>,
    load_seq: u64,
}

impl RoomsState {
    /// Start a list fetch, superseding any still in flight.
    pub fn begin_load(&mut self) -> u64 {
        self.load_seq = self.load_seq.wrapping_add(1);
        self.loading = true;
        self.error = None;
        self.load_seq
    }

    /// Apply the result of fetch `seq` unless a newer fetch has started.
    pub fn finish_load(&mut self, seq: u64, result: Result<Vec<ChatRoom>, ApiError>) -> LoadOutcome {
        if seq != self.load_seq {
            return LoadOutcome::Stale;
        }
        match result {
            Ok(list) => {
                self.set_rooms(list);
                LoadOutcome::Applied(self.rooms.len())
            }
            Err(e) => {
                self.set_error(e.user_message());
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Install a fetched room list.
    ///
    /// Keeps the active room when it is still listed; otherwise selects the
    /// first room.
    pub fn set_rooms(&mut self, rooms: Vec<ChatRoom>) {
        self.rooms = rooms;
        self.loading = false;
        self.error = None;
        let still_listed = self
            .active_id
            .as_deref()
            .is_some_and(|id| self.rooms.iter().any(|r| r.id == id));
        if !still_listed {
            self.active_id = self.rooms.first().map(|r| r.id.clone());
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Select `room_id`. Returns `false` when it was already active or is not listed.
    pub fn select(&mut self, room_id: &str) -> bool {
        if self.active_id.as_deref() == Some(room_id) {
            return false;
        }
        if !self.rooms.iter().any(|r| r.id == room_id) {
            return false;
        }
        self.active_id = Some(room_id.to_owned());
        true
    }

    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    #[must_use]
    pub fn active(&self) -> Option<&ChatRoom> {
        let id = self.active_id.as_deref()?;
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Rooms matching the filter text, in list order.
    #[must_use]
    pub fn filtered(&self, role: Role) -> Vec<&ChatRoom> {
        self.rooms.iter().filter(|r| room_matches(r, role, &self.filter)).collect()
    }
}

/// Case-insensitive substring match against paper name, paper id, and the
/// counterparty's name.
#[must_use]
pub fn room_matches(room: &ChatRoom, role: Role, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let contains = |field: &str| field.to_lowercase().contains(&needle);
    contains(&room.paper_name) || contains(&room.paper_id) || room.counterparty_name(role).is_some_and(contains)
}
