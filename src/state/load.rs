//! Stale-response guard for room-scoped fetches.
//!
//! DESIGN
//! ======
//! Each fetch takes a [`LoadTicket`] stamped with the guard's generation.
//! Starting a newer fetch bumps the generation, so a response carrying an
//! older ticket is recognized as stale and dropped instead of being applied
//! to a different room.

#[cfg(test)]
#[path = "load_test.rs"]
mod load_test;

use crate::error::ApiError;

/// Result of applying a room-scoped fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result was installed; carries the number of items.
    Applied(usize),
    Failed(ApiError),
    /// The room changed while the fetch was in flight.
    Stale,
}

/// Proof of which room and generation a fetch was issued for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub room_id: String,
    generation: u64,
}

/// Tracks the room whose data is current and the latest issued generation.
#[derive(Clone, Debug, Default)]
pub struct LoadGuard {
    room_id: Option<String>,
    generation: u64,
}

impl LoadGuard {
    /// Issue a ticket for `room_id`, superseding every earlier ticket.
    pub fn begin(&mut self, room_id: &str) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        self.room_id = Some(room_id.to_owned());
        LoadTicket { room_id: room_id.to_owned(), generation: self.generation }
    }

    /// Whether `ticket` is still the latest one for the current room.
    #[must_use]
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation && self.room_id.as_deref() == Some(ticket.room_id.as_str())
    }

    /// Ticket for the current room and generation, if a room is open.
    #[must_use]
    pub fn current(&self) -> Option<LoadTicket> {
        let room_id = self.room_id.clone()?;
        Some(LoadTicket { room_id, generation: self.generation })
    }

    /// Invalidate every outstanding ticket without opening a new room.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.room_id = None;
    }

    #[must_use]
    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }
}
