//! Three-column review workspace: rooms, chat, and paper files.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the per-dashboard room, chat, and file state. Room selection is the single
//! trigger for opening a room: when the active id changes, both the chat and
//! the file panel switch and fetch, and results for the previous room are
//! dropped by their load guards.

use leptos::prelude::*;

use crate::components::chat_panel::{ChatPanel, load_messages};
use crate::components::file_manager::{FileManager, load_submissions};
use crate::components::notice_bar::notify;
use crate::components::room_list::RoomList;
use crate::net::api;
use crate::net::types::Role;
use crate::state::chat::ChatState;
use crate::state::files::FilesState;
use crate::state::load::LoadOutcome;
use crate::state::notice::{NoticeKind, NoticeState};
use crate::state::rooms::RoomsState;

fn load_rooms(role: Role, rooms: RwSignal<RoomsState>, notices: RwSignal<NoticeState>) {
    let Some(seq) = rooms.try_update(RoomsState::begin_load) else {
        return;
    };
    leptos::task::spawn_local(async move {
        let result = api::fetch_rooms(role).await;
        match rooms.try_update(|r| r.finish_load(seq, result)) {
            Some(LoadOutcome::Failed(e)) => {
                leptos::logging::warn!("fetch rooms failed: {e}");
                notify(notices, NoticeKind::Error, e.user_message());
            }
            Some(LoadOutcome::Stale) => leptos::logging::log!("dropped superseded room list"),
            _ => {}
        }
    });
}

#[component]
pub fn ChatWindow(role: Role) -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    let rooms = RwSignal::new(RoomsState::default());
    let chat = RwSignal::new(ChatState::default());
    let files = RwSignal::new(FilesState::default());
    provide_context(rooms);
    provide_context(chat);
    provide_context(files);

    Effect::new(move || load_rooms(role, rooms, notices));

    let active_id = Memo::new(move |_| rooms.with(|r| r.active_id().map(str::to_owned)));
    Effect::new(move || {
        let Some(room_id) = active_id.get() else {
            chat.update(ChatState::close);
            files.update(FilesState::close);
            return;
        };
        if let Some(ticket) = chat.try_update(|c| c.open_room(&room_id)).flatten() {
            load_messages(role, ticket, chat, notices);
        }
        if let Some(ticket) = files.try_update(|f| f.open_room(&room_id)).flatten() {
            load_submissions(role, ticket, files, notices);
        }
    });

    let on_retry = Callback::new(move |()| load_rooms(role, rooms, notices));

    view! {
        <div class="chat-window">
            <RoomList role=role on_retry=on_retry/>
            <ChatPanel role=role/>
            <FileManager role=role/>
        </div>
    }
}
