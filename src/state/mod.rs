//! Client state containers.
//!
//! ARCHITECTURE
//! ============
//! Each module holds plain data plus the transitions that keep it consistent.
//! Components wrap them in `RwSignal`s provided via context and never mutate
//! fields behind a transition's back.

pub mod auth;
pub mod chat;
pub mod files;
pub mod load;
pub mod messages;
pub mod notice;
pub mod rooms;
pub mod search;
