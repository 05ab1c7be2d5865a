//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards and role dashboards read this to decide between rendering,
//! waiting for the session bootstrap, and redirecting to `/login`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{Role, User};

/// Current user and whether the session bootstrap is still running.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Whether the signed-in user may view the dashboard for `role`.
    #[must_use]
    pub fn allows(&self, role: Role) -> bool {
        self.role() == Some(role)
    }
}

/// Whether auth has settled with nobody signed in.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Where a signed-in user visiting a dashboard for `wanted` should go instead, if anywhere.
#[must_use]
pub fn role_redirect(state: &AuthState, wanted: Role) -> Option<&'static str> {
    match state.role() {
        Some(role) if role != wanted => Some(role.home_path()),
        _ => None,
    }
}

/// Where `/` should send the user once auth has settled.
#[must_use]
pub fn landing_path(state: &AuthState) -> Option<&'static str> {
    if state.loading {
        return None;
    }
    Some(state.role().map_or("/login", Role::home_path))
}
