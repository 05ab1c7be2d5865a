//! Chat session state for the open room.
//!
//! DESIGN
//! ======
//! Transcript, search, and the composer draft are owned together so that
//! opening a different room replaces all of them at once. Nothing from one
//! room's session can leak into another's.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::error::ApiError;
use crate::net::types::{ChatRoom, Role};
use crate::state::load::LoadTicket;
use crate::state::messages::{MessageStore, PendingSend, SendOutcome, SendRejected};
use crate::state::search::SearchState;

#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: MessageStore,
    pub search: SearchState,
    /// Composer draft.
    pub input: String,
}

impl ChatState {
    /// Open `room_id`, resetting search and the draft.
    ///
    /// Returns `None` when that room is already open, so no fetch is issued.
    pub fn open_room(&mut self, room_id: &str) -> Option<LoadTicket> {
        if self.messages.room_id() == Some(room_id) {
            return None;
        }
        self.search.reset();
        self.input.clear();
        Some(self.messages.begin_load(room_id))
    }

    pub fn close(&mut self) {
        self.messages.clear();
        self.search.reset();
        self.input.clear();
    }

    /// Whether the send control should be enabled for `room`.
    #[must_use]
    pub fn can_send(&self, room: &ChatRoom) -> bool {
        room.status.accepts_messages()
            && !self.input.trim().is_empty()
            && !self.messages.loading()
            && !self.messages.sending()
    }

    /// Append the draft optimistically and clear the composer.
    ///
    /// # Errors
    ///
    /// Returns [`SendRejected`] with no state change when the send is not allowed.
    pub fn begin_send(&mut self, room: &ChatRoom, role: Role, created_at: String) -> Result<PendingSend, SendRejected> {
        let pending = self.messages.begin_send(room, role, &self.input, created_at)?;
        self.input.clear();
        Ok(pending)
    }

    /// Reconcile a send. A failed send puts the original text back in the composer.
    pub fn finish_send(&mut self, pending: PendingSend, result: Result<(), ApiError>) -> SendOutcome {
        let outcome = self.messages.finish_send(pending, result);
        if let SendOutcome::Reverted { input, .. } = &outcome {
            self.input.clone_from(input);
        }
        outcome
    }
}
