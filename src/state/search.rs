//! In-chat search: query, visibility, and the highlighted match.
//!
//! DESIGN
//! ======
//! The match set is never stored. Each search step recomputes it from the
//! current message list, so a changed list or query can never leave a stale
//! match set behind. Only the highlighted index is kept, and every change
//! of query, visibility, or room clears it.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use crate::net::types::Message;

/// Outcome of one find-next step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStep {
    /// Highlight moved to this message index.
    Highlight(usize),
    NoMatches,
    /// Query was empty; nothing is highlighted.
    Cleared,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    pub visible: bool,
    pub query: String,
    pub highlight: Option<usize>,
}

impl SearchState {
    /// Show or hide the search bar. Hiding clears the query and highlight.
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.visible = true;
        } else {
            self.reset();
        }
    }

    pub fn toggle(&mut self) {
        self.set_visible(!self.visible);
    }

    /// Replace the query. Any highlight from the previous query is dropped.
    pub fn set_query(&mut self, query: &str) {
        if self.query != query {
            self.query = query.to_owned();
            self.highlight = None;
        }
    }

    /// Move to the next match strictly after the current highlight,
    /// wrapping to the first match.
    pub fn find_next(&mut self, messages: &[Message]) -> SearchStep {
        if self.query.trim().is_empty() {
            self.highlight = None;
            return SearchStep::Cleared;
        }
        let matches = match_indices(messages, &self.query);
        let next = match self.highlight {
            Some(current) => matches.iter().copied().find(|&i| i > current).or_else(|| matches.first().copied()),
            None => matches.first().copied(),
        };
        self.highlight = next;
        match next {
            Some(index) => SearchStep::Highlight(index),
            None => SearchStep::NoMatches,
        }
    }

    /// Highlighted index, but only if it still points into `messages`.
    #[must_use]
    pub fn highlight_in(&self, messages: &[Message]) -> Option<usize> {
        self.highlight.filter(|&i| i < messages.len())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Indices of messages containing `query`, compared case-insensitively.
#[must_use]
pub fn match_indices(messages: &[Message], query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    messages
        .iter()
        .enumerate()
        .filter(|(_, m)| m.text.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}
