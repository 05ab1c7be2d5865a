//! Chat panel for the active review room.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders the transcript, composer, in-chat search, and the paper-details
//! disclosure. Sends are optimistic: the message appears immediately and is
//! removed again, with the draft restored, if the backend rejects it.

#[cfg(test)]
#[path = "chat_panel_test.rs"]
mod chat_panel_test;

use leptos::prelude::*;

use crate::components::notice_bar::notify;
use crate::components::room_list::status_badge_class;
use crate::net::api;
use crate::net::types::{ChatRoom, Message, Role, RoomStatus};
use crate::state::chat::ChatState;
use crate::state::load::{LoadOutcome, LoadTicket};
use crate::state::messages::{PendingSend, SendOutcome, SendRejected};
use crate::state::notice::{NoticeKind, NoticeState};
use crate::state::rooms::RoomsState;
use crate::state::search::SearchStep;
use crate::util::debounce::Debouncer;
use crate::util::time::{clock_label, now_iso};

/// DOM id of the transcript entry at `index`, used for scroll-to-highlight.
pub(crate) fn message_dom_id(index: usize) -> String {
    format!("chat-msg-{index}")
}

pub(crate) fn empty_state_text(role: Role) -> String {
    format!("No messages yet. Start the conversation with your {}.", role.counterpart_label())
}

pub(crate) fn closed_room_text(status: RoomStatus) -> String {
    format!("Chat is {}. No new messages can be sent.", status.as_str())
}

pub(crate) fn sender_label(message: &Message, role: Role) -> &'static str {
    if message.sender == role { "You" } else { message.sender.display_name() }
}

/// What the transcript renders: the messages and the in-range highlight.
///
/// Composer and query edits leave it unchanged, so views keyed on it do not
/// rebuild while the user types.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Transcript {
    pub messages: Vec<Message>,
    pub highlight: Option<usize>,
}

pub(crate) fn transcript_of(chat: &ChatState) -> Transcript {
    let messages = chat.messages.messages();
    Transcript { messages: messages.to_vec(), highlight: chat.search.highlight_in(messages) }
}

/// Label/value rows for the paper-details disclosure.
pub(crate) fn detail_rows(room: &ChatRoom, role: Role) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Paper", room.paper_name.clone()),
        ("Paper ID", room.paper_id.clone()),
        ("Theme", room.theme.clone()),
        ("Topic", room.topic.clone()),
        ("Tagline", room.tagline.clone()),
        ("Team Size", room.team_size.to_string()),
        ("Date", room.date.clone()),
        ("Deadline", room.deadline.clone()),
        ("Hall", room.hall.clone()),
        ("Rules", room.rules.clone()),
    ];
    match role {
        Role::Reviewer => {
            rows.push(("Author", room.author_name.clone()));
            rows.push(("Author Email", room.author_email.clone()));
        }
        Role::Author => {
            let reviewer = room
                .reviewer_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| "Not Assigned".to_owned());
            rows.push(("Reviewer", reviewer));
        }
    }
    rows
}

/// Fetch the transcript for `ticket` and apply it unless the room changed.
pub(crate) fn load_messages(
    role: Role,
    ticket: LoadTicket,
    chat: RwSignal<ChatState>,
    notices: RwSignal<NoticeState>,
) {
    leptos::task::spawn_local(async move {
        let result = api::fetch_messages(role, &ticket.room_id).await;
        match chat.try_update(|c| c.messages.finish_load(&ticket, result)) {
            Some(LoadOutcome::Failed(e)) => {
                leptos::logging::warn!("fetch messages for {} failed: {e}", ticket.room_id);
                notify(notices, NoticeKind::Error, e.user_message());
            }
            Some(LoadOutcome::Stale) => {
                leptos::logging::log!("dropped stale transcript for room {}", ticket.room_id);
            }
            _ => {}
        }
    });
}

fn send_pending(role: Role, pending: PendingSend, chat: RwSignal<ChatState>, notices: RwSignal<NoticeState>) {
    leptos::task::spawn_local(async move {
        let result = api::send_message(role, pending.room_id(), pending.text(), pending.created_at()).await;
        match chat.try_update(|c| c.finish_send(pending, result)) {
            Some(SendOutcome::Reverted { error, .. }) => {
                leptos::logging::warn!("send failed, reverted: {error}");
                notify(notices, NoticeKind::Error, error.user_message());
            }
            Some(SendOutcome::Stale) => leptos::logging::log!("dropped stale send result"),
            _ => {}
        }
    });
}

fn run_search(chat: RwSignal<ChatState>, notices: RwSignal<NoticeState>) {
    if let Some(SearchStep::NoMatches) = chat.try_update(|c| c.search.find_next(c.messages.messages())) {
        notify(notices, NoticeKind::Info, "No matches");
    }
}

#[cfg(feature = "hydrate")]
fn scroll_to_message(index: usize) {
    let Some(el) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(&message_dom_id(index)))
    else {
        return;
    };
    let opts = web_sys::ScrollIntoViewOptions::new();
    opts.set_behavior(web_sys::ScrollBehavior::Smooth);
    opts.set_block(web_sys::ScrollLogicalPosition::Center);
    el.scroll_into_view_with_scroll_into_view_options(&opts);
}

#[component]
pub fn ChatPanel(role: Role) -> impl IntoView {
    let rooms = expect_context::<RwSignal<RoomsState>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();

    let room = Memo::new(move |_| rooms.with(|r| r.active().cloned()));
    let show_details = RwSignal::new(false);
    let debouncer = StoredValue::new_local(Debouncer::new(crate::config::client().search_debounce_ms));
    let transcript_ref = NodeRef::<leptos::html::Div>::new();
    let transcript = Memo::new(move |_| chat.with(transcript_of));
    let message_count = Memo::new(move |_| transcript.with(|t| t.messages.len()));
    let highlight = Memo::new(move |_| transcript.with(|t| t.highlight));
    let loading = Memo::new(move |_| chat.with(|c| c.messages.loading()));

    // Keep the newest message in view.
    Effect::new(move || {
        let _ = message_count.get();
        #[cfg(feature = "hydrate")]
        if let Some(el) = transcript_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    // Bring the highlighted match into view.
    Effect::new(move || {
        let index = highlight.get();
        #[cfg(feature = "hydrate")]
        if let Some(index) = index {
            scroll_to_message(index);
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = index;
    });

    let do_send = move || {
        let Some(active) = room.get_untracked() else {
            return;
        };
        let Some(result) = chat.try_update(|c| c.begin_send(&active, role, now_iso())) else {
            return;
        };
        match result {
            Ok(pending) => send_pending(role, pending, chat, notices),
            Err(SendRejected::Blank) => {}
            Err(rejected) => notify(notices, NoticeKind::Info, rejected.to_string()),
        }
    };

    let on_composer_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let on_search_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        chat.update(|c| c.search.set_query(&value));
        debouncer.update_value(|d| {
            d.schedule(move || run_search(chat, notices));
        });
    };

    let find_next_now = move || {
        debouncer.update_value(Debouncer::cancel);
        run_search(chat, notices);
    };

    let toggle_search = move |_| {
        debouncer.update_value(Debouncer::cancel);
        chat.update(|c| c.search.toggle());
    };

    let can_send = move || room.with(|r| r.as_ref().is_some_and(|r| chat.with(|c| c.can_send(r))));
    let is_open = move || room.with(|r| r.as_ref().is_some_and(|r| r.status.accepts_messages()));

    view! {
        <Show
            when=move || room.with(Option::is_some)
            fallback=|| view! { <section class="chat-panel chat-panel--empty">"Select a room to start chatting"</section> }
        >
            <section class="chat-panel">
                <header class="chat-panel__header">
                    <div class="chat-panel__heading">
                        <h2 class="chat-panel__title">
                            {move || room.with(|r| r.as_ref().map(|r| r.paper_name.clone()).unwrap_or_default())}
                        </h2>
                        <span class="chat-panel__counterparty">
                            {move || {
                                room.with(|r| {
                                    r.as_ref()
                                        .and_then(|r| r.counterparty_name(role).map(str::to_owned))
                                        .unwrap_or_default()
                                })
                            }}
                        </span>
                    </div>
                    <span class=move || {
                        room.with(|r| r.as_ref().map_or("badge", |r| status_badge_class(r.status)))
                    }>
                        {move || room.with(|r| r.as_ref().map(|r| r.status.as_str()).unwrap_or_default())}
                    </span>
                    <button class="btn chat-panel__search-toggle" title="Search messages" on:click=toggle_search>
                        "Search"
                    </button>
                    <button class="btn chat-panel__details-toggle" on:click=move |_| show_details.update(|v| *v = !*v)>
                        {move || if show_details.get() { "Hide details" } else { "Paper details" }}
                    </button>
                </header>

                <Show when=move || show_details.get()>
                    <dl class="chat-panel__details">
                        {move || {
                            room.with(|r| {
                                r.as_ref()
                                    .map(|r| detail_rows(r, role))
                                    .unwrap_or_default()
                                    .into_iter()
                                    .map(|(label, value)| {
                                        view! {
                                            <dt>{label}</dt>
                                            <dd>{value}</dd>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            })
                        }}
                    </dl>
                </Show>

                <Show when=move || chat.with(|c| c.search.visible)>
                    <div class="chat-panel__search">
                        <input
                            class="chat-panel__search-input"
                            type="search"
                            placeholder="Search in chat..."
                            prop:value=move || chat.with(|c| c.search.query.clone())
                            on:input=on_search_input
                            on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    find_next_now();
                                }
                            }
                        />
                        <button class="btn" on:click=move |_| find_next_now()>
                            "Next"
                        </button>
                    </div>
                </Show>

                <div class="chat-panel__messages" node_ref=transcript_ref>
                    {move || {
                        if loading.get() {
                            return view! { <div class="chat-panel__loader">"Loading messages..."</div> }.into_any();
                        }
                        let Transcript { messages, highlight } = transcript.get();
                        if messages.is_empty() {
                            return view! { <div class="chat-panel__empty">{empty_state_text(role)}</div> }.into_any();
                        }
                        messages
                            .into_iter()
                            .enumerate()
                            .map(|(index, msg)| {
                                let own = msg.sender == role;
                                view! {
                                    <div
                                        id=message_dom_id(index)
                                        class="chat-msg"
                                        class:chat-msg--own=own
                                        class:chat-msg--highlight=highlight == Some(index)
                                    >
                                        <span class="chat-msg__sender">{sender_label(&msg, role)}</span>
                                        <p class="chat-msg__text">{msg.text.clone()}</p>
                                        <span class="chat-msg__time">{clock_label(&msg.created_at)}</span>
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                            .into_any()
                    }}
                </div>

                <Show
                    when=is_open
                    fallback=move || {
                        view! {
                            <p class="chat-panel__closed">
                                {move || room.with(|r| r.as_ref().map(|r| closed_room_text(r.status)).unwrap_or_default())}
                            </p>
                        }
                    }
                >
                    <div class="chat-panel__input-row">
                        <textarea
                            class="chat-panel__input"
                            rows="2"
                            placeholder="Type a message..."
                            prop:value=move || chat.with(|c| c.input.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                chat.update(|c| c.input = value);
                            }
                            on:keydown=on_composer_keydown
                        ></textarea>
                        <button
                            class="btn btn--primary chat-panel__send"
                            on:click=move |_| do_send()
                            disabled=move || !can_send()
                        >
                            {move || if chat.with(|c| c.messages.sending()) { "Sending..." } else { "Send" }}
                        </button>
                    </div>
                </Show>
            </section>
        </Show>
    }
}
