//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the review workspace while reading and writing shared
//! state from Leptos context providers.

pub mod chat_panel;
pub mod chat_window;
pub mod file_manager;
pub mod notice_bar;
pub mod profile_menu;
pub mod room_list;
