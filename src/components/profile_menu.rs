//! Header menu showing the signed-in user with a logout action.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn ProfileMenu() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let open = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let identity = move || {
        auth.with(|a| {
            a.user
                .as_ref()
                .map(|u| (u.display_name().to_owned(), u.email.clone(), u.role.display_name()))
                .unwrap_or_default()
        })
    };

    let on_logout = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        leptos::task::spawn_local(async move {
            crate::net::api::logout().await;
            crate::util::session::clear_role();
            auth.update(|a| a.user = None);
            busy.set(false);
            #[cfg(feature = "hydrate")]
            if let Some(w) = web_sys::window() {
                let _ = w.location().set_href("/login");
            }
        });
    };

    view! {
        <div class="profile-menu">
            <button class="btn profile-menu__toggle" on:click=move |_| open.update(|v| *v = !*v)>
                {move || identity().0}
                <span class="profile-menu__role">{move || identity().2}</span>
            </button>
            <Show when=move || open.get()>
                <div class="profile-menu__panel">
                    <p class="profile-menu__email">{move || identity().1}</p>
                    <button class="btn profile-menu__logout" disabled=move || busy.get() on:click=on_logout>
                        "Logout"
                    </button>
                </div>
            </Show>
        </div>
    }
}
