//! Transient notifications shown above the dashboard.
//!
//! DESIGN
//! ======
//! Every success and failure path reports through this queue. Entries are
//! dismissed by the user or expire after the configured TTL; ids are never
//! reused so a late expiry cannot remove a newer notice.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

/// Upper bound on visible notices; the oldest is dropped first.
pub const MAX_NOTICES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "notice notice--info",
            Self::Success => "notice notice--success",
            Self::Error => "notice notice--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Clone, Debug, Default)]
pub struct NoticeState {
    pub items: Vec<Notice>,
    next_id: u64,
}

impl NoticeState {
    /// Queue a notice and return its id for later dismissal.
    pub fn push(&mut self, kind: NoticeKind, text: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.items.push(Notice { id: self.next_id, kind, text: text.into() });
        if self.items.len() > MAX_NOTICES {
            let overflow = self.items.len() - MAX_NOTICES;
            self.items.drain(..overflow);
        }
        self.next_id
    }

    /// Remove notice `id`; unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }
}
