//! Networking modules for the paper-review REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues credentialed HTTP calls and `types` defines the wire schema
//! shared by every page and component.

pub mod api;
pub mod types;
