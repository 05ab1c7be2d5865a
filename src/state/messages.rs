//! Message store for the open room.
//!
//! DESIGN
//! ======
//! The list is replaced wholesale by fetches and otherwise only grows by
//! optimistic appends. A send is a reversible action: [`PendingSend`]
//! captures the appended index and message, and a failed send removes
//! exactly that entry. Only one send may be in flight at a time, so reverts
//! can never interleave.

#[cfg(test)]
#[path = "messages_test.rs"]
mod messages_test;

use crate::error::ApiError;
use crate::net::types::{ChatRoom, Message, Role, RoomStatus};
use crate::state::load::{LoadGuard, LoadOutcome, LoadTicket};

/// Why a send was refused before any network call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SendRejected {
    #[error("message is blank")]
    Blank,
    #[error("chat is {}; no new messages can be sent", .0.as_str())]
    RoomClosed(RoomStatus),
    #[error("no chat room is open")]
    NoRoom,
    #[error("messages are still loading")]
    Loading,
    #[error("a message is already being sent")]
    InFlight,
}

/// Result of reconciling a send with the server's answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Confirmed,
    /// The optimistic entry was removed; `input` should go back in the composer.
    Reverted { input: String, error: ApiError },
    Stale,
}

/// An optimistic append awaiting the server's answer.
#[derive(Clone, Debug)]
pub struct PendingSend {
    ticket: LoadTicket,
    seq: u64,
    index: usize,
    message: Message,
    input: String,
}

impl PendingSend {
    #[must_use]
    pub fn room_id(&self) -> &str {
        &self.ticket.room_id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.message.text
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.message.sender
    }

    #[must_use]
    pub fn created_at(&self) -> &str {
        &self.message.created_at
    }
}

#[derive(Clone, Debug, Default)]
pub struct MessageStore {
    guard: LoadGuard,
    messages: Vec<Message>,
    loading: bool,
    send_seq: u64,
    in_flight: Option<u64>,
}

impl MessageStore {
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn sending(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn room_id(&self) -> Option<&str> {
        self.guard.room_id()
    }

    /// Start loading `room_id`: clears the list and supersedes earlier loads
    /// and sends.
    pub fn begin_load(&mut self, room_id: &str) -> LoadTicket {
        let ticket = self.guard.begin(room_id);
        self.messages.clear();
        self.loading = true;
        self.in_flight = None;
        ticket
    }

    /// Apply a fetch result if `ticket` is still current.
    ///
    /// On failure the list stays empty.
    pub fn finish_load(&mut self, ticket: &LoadTicket, result: Result<Vec<Message>, ApiError>) -> LoadOutcome {
        if !self.guard.is_current(ticket) {
            return LoadOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(list) => {
                self.messages = list;
                LoadOutcome::Applied(self.messages.len())
            }
            Err(e) => {
                self.messages.clear();
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Validate and optimistically append `input` as a message from `role`.
    ///
    /// # Errors
    ///
    /// Returns [`SendRejected`] without mutating anything when the text is
    /// blank, the room is not pending or not open, messages are loading, or
    /// another send is in flight.
    pub fn begin_send(
        &mut self,
        room: &ChatRoom,
        role: Role,
        input: &str,
        created_at: String,
    ) -> Result<PendingSend, SendRejected> {
        if input.trim().is_empty() {
            return Err(SendRejected::Blank);
        }
        if !room.status.accepts_messages() {
            return Err(SendRejected::RoomClosed(room.status));
        }
        let ticket = self
            .guard
            .current()
            .filter(|t| t.room_id == room.id)
            .ok_or(SendRejected::NoRoom)?;
        if self.loading {
            return Err(SendRejected::Loading);
        }
        if self.in_flight.is_some() {
            return Err(SendRejected::InFlight);
        }

        let message = Message { id: None, text: input.to_owned(), sender: role, created_at };
        let index = self.messages.len();
        self.messages.push(message.clone());
        self.send_seq = self.send_seq.wrapping_add(1);
        self.in_flight = Some(self.send_seq);

        Ok(PendingSend { ticket, seq: self.send_seq, index, message, input: input.to_owned() })
    }

    /// Reconcile `pending` with the server's answer.
    ///
    /// Success keeps the optimistic entry as-is (it gets no server id until
    /// the next reload). Failure removes exactly that entry.
    pub fn finish_send(&mut self, pending: PendingSend, result: Result<(), ApiError>) -> SendOutcome {
        if !self.guard.is_current(&pending.ticket) || self.in_flight != Some(pending.seq) {
            return SendOutcome::Stale;
        }
        self.in_flight = None;
        match result {
            Ok(()) => SendOutcome::Confirmed,
            Err(error) => {
                if self.messages.get(pending.index) == Some(&pending.message) {
                    self.messages.remove(pending.index);
                }
                SendOutcome::Reverted { input: pending.input, error }
            }
        }
    }

    /// Drop all messages and invalidate outstanding loads and sends.
    pub fn clear(&mut self) {
        self.guard.invalidate();
        self.messages.clear();
        self.loading = false;
        self.in_flight = None;
    }
}
