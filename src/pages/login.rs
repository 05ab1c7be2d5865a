//! Login page with a role toggle and email + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::Role;
use crate::state::auth::AuthState;

/// Trim and validate the login form.
///
/// # Errors
///
/// Returns the message to show when a field is missing or the email is malformed.
pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'));
    if !well_formed {
        return Err("Enter a valid email address.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let role = RwSignal::new(Role::Author);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Preselect the role used last time; read after mount so SSR markup matches.
    Effect::new(move || {
        if let Some(stored) = crate::util::session::stored_role() {
            role.set(stored);
        }
    });

    // Signed-in users go straight to their dashboard.
    Effect::new(move || {
        if let Some(current) = auth.with(AuthState::role) {
            navigate(current.home_path(), NavigateOptions::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(fields) => fields,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        let role_value = role.get();
        busy.set(true);
        info.set("Signing in...".to_owned());

        leptos::task::spawn_local(async move {
            let result = match crate::net::api::login(role_value, &email_value, &password_value).await {
                Ok(()) => crate::net::api::fetch_profile(role_value).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(user) => {
                    crate::util::session::store_role(user.role);
                    info.set(String::new());
                    auth.set(AuthState { user: Some(user), loading: false });
                }
                Err(e) => {
                    leptos::logging::warn!("login as {} failed: {e}", role_value.as_str());
                    info.set(format!("Login failed: {}", e.user_message()));
                }
            }
            busy.set(false);
        });
    };

    let role_button = move |value: Role| {
        view! {
            <button
                type="button"
                class="login-role__option"
                class:login-role__option--active=move || role.get() == value
                on:click=move |_| role.set(value)
            >
                {value.display_name()}
            </button>
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Paper Review Portal"</h1>
                <p class="login-card__subtitle">"Sign in to continue"</p>
                <div class="login-role" role="group" aria-label="Sign in as">
                    {role_button(Role::Author)}
                    {role_button(Role::Reviewer)}
                </div>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || format!("Sign in as {}", role.get().display_name())}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
