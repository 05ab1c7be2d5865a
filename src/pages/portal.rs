//! Role dashboards and the root redirect.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/author` and `/reviewer` host the same workspace parameterized by role.
//! Each dashboard only renders for a user signed in under that role; anyone
//! else is redirected once the session bootstrap settles.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::chat_window::ChatWindow;
use crate::components::profile_menu::ProfileMenu;
use crate::net::types::Role;
use crate::state::auth::{AuthState, landing_path};
use crate::util::auth::install_role_guard;

#[component]
pub fn AuthorPage() -> impl IntoView {
    view! { <RoleDashboard role=Role::Author/> }
}

#[component]
pub fn ReviewerPage() -> impl IntoView {
    view! { <RoleDashboard role=Role::Reviewer/> }
}

#[component]
fn RoleDashboard(role: Role) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_role_guard(auth, role, use_navigate());

    view! {
        <Show
            when=move || auth.with(|a| !a.loading && a.allows(role))
            fallback=move || {
                view! {
                    <div class="dashboard-page">
                        <p>{move || if auth.with(|a| a.loading) { "Loading..." } else { "Redirecting..." }}</p>
                    </div>
                }
            }
        >
            <div class="dashboard-page">
                <header class="dashboard-page__header toolbar">
                    <span class="toolbar__title">{format!("{} Dashboard", role.display_name())}</span>
                    <span class="toolbar__spacer"></span>
                    <ProfileMenu/>
                </header>
                <ChatWindow role=role/>
            </div>
        </Show>
    }
}

/// `/`: forwards to the signed-in user's dashboard or to `/login`.
#[component]
pub fn HomeRedirect() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(path) = auth.with(landing_path) {
            navigate(path, NavigateOptions::default());
        }
    });

    view! {
        <div class="dashboard-page">
            <p>"Loading..."</p>
        </div>
    }
}
