//! Toast stack for transient success and error notices.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components report through [`notify`] rather than rendering their own
//! error text, so every failure path surfaces the same way and expires on the
//! same schedule.

use leptos::prelude::*;

use crate::state::notice::{NoticeKind, NoticeState};

/// Queue a notice and, in the browser, expire it after the configured TTL.
pub fn notify(notices: RwSignal<NoticeState>, kind: NoticeKind, text: impl Into<String>) {
    let Some(id) = notices.try_update(|n| n.push(kind, text)) else {
        return;
    };
    #[cfg(feature = "hydrate")]
    {
        let ttl = crate::config::client().notice_ttl_ms;
        gloo_timers::callback::Timeout::new(ttl, move || {
            notices.try_update(|n| n.dismiss(id));
        })
        .forget();
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
    }
}

#[component]
pub fn NoticeBar() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="notice-bar" role="status" aria-live="polite">
            <For
                each=move || notices.get().items
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.css_class()>
                            <span class="notice__text">{n.text}</span>
                            <button
                                class="notice__close"
                                title="Dismiss"
                                on:click=move |_| notices.update(|s| s.dismiss(id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
