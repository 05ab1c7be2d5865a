//! Sidebar listing the review rooms visible to the current role.
//!
//! SYSTEM CONTEXT
//! ==============
//! Selection writes into the shared `RoomsState`; the chat window reacts to
//! the active id and opens the room, so re-clicking the active entry is inert.

use leptos::prelude::*;

use crate::net::types::{ChatRoom, Role, RoomStatus};
use crate::state::rooms::RoomsState;

/// Primary label for a room entry: the counterparty for reviewers, the paper
/// id for authors.
pub(crate) fn room_title(room: &ChatRoom, role: Role) -> String {
    match role {
        Role::Reviewer => room.counterparty_name(role).filter(|n| !n.is_empty()).unwrap_or("Unknown author").to_owned(),
        Role::Author => room.paper_id.clone(),
    }
}

pub(crate) fn status_badge_class(status: RoomStatus) -> &'static str {
    match status {
        RoomStatus::Pending => "badge badge--pending",
        RoomStatus::Completed => "badge badge--completed",
        RoomStatus::Declined => "badge badge--declined",
    }
}

#[component]
pub fn RoomList(role: Role, on_retry: Callback<()>) -> impl IntoView {
    let rooms = expect_context::<RwSignal<RoomsState>>();

    let visible = move || rooms.with(|r| r.filtered(role).into_iter().cloned().collect::<Vec<_>>());
    let active_id = move || rooms.with(|r| r.active_id().map(str::to_owned));

    view! {
        <aside class="room-list">
            <input
                class="room-list__filter"
                type="search"
                placeholder="Search rooms..."
                prop:value=move || rooms.with(|r| r.filter.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    rooms.update(|r| r.filter = value);
                }
            />
            <Show
                when=move || !rooms.with(|r| r.loading)
                fallback=|| view! { <div class="room-list__loader">"Loading rooms..."</div> }
            >
                <Show
                    when=move || rooms.with(|r| r.error.is_none())
                    fallback=move || {
                        view! {
                            <div class="room-list__error">
                                <p>{move || rooms.with(|r| r.error.clone().unwrap_or_default())}</p>
                                <button class="btn" on:click=move |_| on_retry.run(())>
                                    "Retry"
                                </button>
                            </div>
                        }
                    }
                >
                    <Show
                        when=move || !visible().is_empty()
                        fallback=|| view! { <p class="room-list__empty">"No rooms found"</p> }
                    >
                        <ul class="room-list__items">
                            <For
                                each=visible
                                key=|room| room.id.clone()
                                children=move |room| {
                                    let id = room.id.clone();
                                    let select_id = room.id.clone();
                                    let is_active = move || active_id().as_deref() == Some(id.as_str());
                                    view! {
                                        <li
                                            class="room-list__item"
                                            class:room-list__item--active=is_active
                                            on:click=move |_| {
                                                rooms.update(|r| {
                                                    r.select(&select_id);
                                                });
                                            }
                                        >
                                            <div class="room-list__title">{room_title(&room, role)}</div>
                                            <div class="room-list__paper">{room.paper_name.clone()}</div>
                                            <div class="room-list__meta">
                                                <span class="room-list__theme">{room.theme.clone()}</span>
                                                <span class=status_badge_class(room.status)>
                                                    {room.status.as_str()}
                                                </span>
                                            </div>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </Show>
                </Show>
            </Show>
        </aside>
    }
}
