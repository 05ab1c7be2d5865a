//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::notice_bar::NoticeBar;
use crate::pages::login::LoginPage;
use crate::pages::portal::{AuthorPage, HomeRedirect, ReviewerPage};
use crate::state::auth::AuthState;
use crate::state::notice::NoticeState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Restore the session from the stored role flag, if there is one.
///
/// Clears the stored role when the backend no longer recognizes the session.
fn bootstrap_session(auth: RwSignal<AuthState>) {
    let Some(role) = crate::util::session::stored_role() else {
        auth.update(|a| a.loading = false);
        return;
    };
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_profile(role).await {
            Ok(user) => auth.set(AuthState { user: Some(user), loading: false }),
            Err(e) => {
                leptos::logging::log!("no active {} session: {e}", role.as_str());
                if e.is_unauthorized() || matches!(e, crate::error::ApiError::Rejected(_)) {
                    crate::util::session::clear_role();
                }
                auth.set(AuthState { user: None, loading: false });
            }
        }
    });
}

/// Root application component.
///
/// Provides the session and notice contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState { user: None, loading: true });
    let notices = RwSignal::new(NoticeState::default());
    provide_context(auth);
    provide_context(notices);

    // Effects only run in the browser, so SSR renders the loading state.
    Effect::new(move || bootstrap_session(auth));

    view! {
        <Stylesheet id="leptos" href="/pkg/review-portal.css"/>
        <Title text="Paper Review Portal"/>

        <NoticeBar/>
        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomeRedirect/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("author") view=AuthorPage/>
                <Route path=StaticSegment("reviewer") view=ReviewerPage/>
            </Routes>
        </Router>
    }
}
