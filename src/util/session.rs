//! Persisted role flag for session bootstrap.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend session lives in a cookie, but which profile endpoint to ask
//! depends on the role the user signed in as. The role is kept in
//! `localStorage` so a reload can restore the session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::Role;

const ROLE_KEY: &str = "review_portal.role";

/// Role the user last signed in as, if any.
#[must_use]
pub fn stored_role() -> Option<Role> {
    #[cfg(feature = "hydrate")]
    {
        let raw = local_storage()?.get_item(ROLE_KEY).ok().flatten()?;
        decode_role(&raw)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

pub fn store_role(role: Role) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        let Ok(raw) = serde_json::to_string(&role) else {
            return;
        };
        let _ = storage.set_item(ROLE_KEY, &raw);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = role;
    }
}

pub fn clear_role() {
    #[cfg(feature = "hydrate")]
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(ROLE_KEY);
    }
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Parse a stored role: JSON-encoded, or a bare flag written by older builds.
#[cfg(any(test, feature = "hydrate"))]
fn decode_role(raw: &str) -> Option<Role> {
    serde_json::from_str::<Role>(raw).ok().or_else(|| Role::from_flag(raw))
}
