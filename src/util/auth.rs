//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both role dashboards apply identical redirect behavior: signed-out users go
//! to `/login`, and a user signed in under the other role goes to their own
//! dashboard.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::types::Role;
use crate::state::auth::{AuthState, role_redirect, should_redirect_unauth};

/// Redirect away from the `wanted` dashboard whenever auth has settled and
/// the user may not view it.
pub fn install_role_guard<F>(auth: RwSignal<AuthState>, wanted: Role, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let state = auth.get();
        if should_redirect_unauth(&state) {
            navigate("/login", NavigateOptions::default());
        } else if let Some(path) = role_redirect(&state, wanted) {
            navigate(path, NavigateOptions::default());
        }
    });
}
