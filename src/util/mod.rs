//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic so the pure parts stay testable off-browser.

pub mod auth;
pub mod debounce;
pub mod session;
pub mod time;
