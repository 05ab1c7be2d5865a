//! Paper file panel for the active room.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authors stage and upload paper files; reviewers review the submitted list
//! and accept a submission through a confirmation dialog. Browser `File`
//! handles live in a component-local map keyed by the staged entry's key,
//! since they cannot be shared across threads like the rest of the state.

#[cfg(test)]
#[path = "file_manager_test.rs"]
mod file_manager_test;

use leptos::prelude::*;

use crate::components::notice_bar::notify;
use crate::net::api;
use crate::net::types::{Role, Submission};
use crate::state::files::{ACCEPT_ATTR, AcceptOutcome, AcceptPhase, FilesState, MAX_STAGED_FILES, PendingAccept};
#[cfg(any(test, feature = "hydrate"))]
use crate::state::files::StagedFile;
use crate::state::load::{LoadOutcome, LoadTicket};
use crate::state::notice::{NoticeKind, NoticeState};
use crate::state::rooms::RoomsState;

/// Fetch the submission list for `ticket` and apply it unless the room changed.
pub(crate) fn load_submissions(
    role: Role,
    ticket: LoadTicket,
    files: RwSignal<FilesState>,
    notices: RwSignal<NoticeState>,
) {
    leptos::task::spawn_local(async move {
        let result = api::fetch_submissions(role, &ticket.room_id).await;
        match files.try_update(|f| f.finish_load(&ticket, result)) {
            Some(LoadOutcome::Failed(e)) => {
                leptos::logging::warn!("fetch submissions for {} failed: {e}", ticket.room_id);
                notify(notices, NoticeKind::Error, e.user_message());
            }
            Some(LoadOutcome::Stale) => {
                leptos::logging::log!("dropped stale submissions for room {}", ticket.room_id);
            }
            _ => {}
        }
    });
}

fn run_accept(role: Role, pending: PendingAccept, files: RwSignal<FilesState>, notices: RwSignal<NoticeState>) {
    leptos::task::spawn_local(async move {
        let result = api::accept_submission(pending.room_id()).await;
        match files.try_update(|f| f.finish_accept(&pending, result)) {
            Some(AcceptOutcome::Accepted) => {
                notify(notices, NoticeKind::Success, "Submission accepted");
                if let Some(ticket) = files.try_update(FilesState::reload).flatten() {
                    load_submissions(role, ticket, files, notices);
                }
            }
            Some(AcceptOutcome::Failed(e)) => {
                leptos::logging::warn!("accept {} failed: {e}", pending.submission_id);
                notify(notices, NoticeKind::Error, e.user_message());
            }
            Some(AcceptOutcome::Stale) => leptos::logging::log!("dropped stale accept result"),
            None => {}
        }
    });
}

/// File name shown for a submission, taken from the last path segment.
pub(crate) fn submission_label(submission: &Submission) -> String {
    submission
        .file_url
        .rsplit('/')
        .find(|part| !part.is_empty())
        .unwrap_or(submission.file_url.as_str())
        .to_owned()
}

/// Drop picked-file handles whose staged entry is gone, whether it was
/// uploaded, removed, or discarded by a room switch.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn retain_staged<V>(handles: &mut std::collections::HashMap<u64, V>, staged: &[StagedFile]) {
    handles.retain(|key, _| staged.iter().any(|f| f.key == *key));
}

fn open_submission(file_path: &str) {
    let url = api::file_url(&crate::config::client().events_base_url, file_path);
    #[cfg(feature = "hydrate")]
    if let Some(window) = web_sys::window() {
        let _ = window.open_with_url_and_target(&url, "_blank");
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = url;
}

#[component]
pub fn FileManager(role: Role) -> impl IntoView {
    let files = expect_context::<RwSignal<FilesState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <aside class="file-manager">
            <h3 class="file-manager__title">"Paper files"</h3>
            {match role {
                Role::Author => Some(view! { <UploadForm/> }),
                Role::Reviewer => None,
            }}
            <SubmissionList role=role/>
            <Show when=move || files.with(|f| matches!(f.accept_phase(), AcceptPhase::Confirming(_)))>
                <ConfirmAcceptDialog
                    on_cancel=Callback::new(move |()| files.update(FilesState::cancel_accept))
                    on_confirm=Callback::new(move |()| {
                        if let Some(pending) = files.try_update(|f| f.confirm_accept(role)).flatten() {
                            run_accept(role, pending, files, notices);
                        }
                    })
                />
            </Show>
        </aside>
    }
}

/// Author staging area and upload trigger.
#[component]
fn UploadForm() -> impl IntoView {
    let role = Role::Author;
    let files = expect_context::<RwSignal<FilesState>>();
    let rooms = expect_context::<RwSignal<RoomsState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();

    #[cfg(feature = "hydrate")]
    let handles = StoredValue::new_local(std::collections::HashMap::<u64, web_sys::File>::new());

    #[cfg(feature = "hydrate")]
    {
        let staged = Memo::new(move |_| files.with(|f| f.staged().to_vec()));
        Effect::new(move || {
            let staged = staged.get();
            handles.update_value(|h| retain_staged(h, &staged));
        });
    }

    let on_pick = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            if let Some(list) = input.files() {
                for idx in 0..list.length() {
                    let Some(file) = list.get(idx) else {
                        continue;
                    };
                    match files.try_update(|f| f.stage(role, &file.name())) {
                        Some(Ok(key)) => handles.update_value(|h| {
                            h.insert(key, file);
                        }),
                        Some(Err(rejected)) => {
                            notify(notices, NoticeKind::Error, rejected.to_string());
                            break;
                        }
                        None => break,
                    }
                }
            }
            input.set_value("");
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let on_remove = move |key: u64| {
        files.update(|f| {
            f.unstage(key);
        });
    };

    let on_upload = move |_| {
        let paper_id = rooms.with_untracked(|r| r.active().map(|room| room.paper_id.clone()).unwrap_or_default());
        let batch = match files.try_update(|f| f.begin_upload(role, &paper_id)) {
            Some(Ok(batch)) => batch,
            Some(Err(rejected)) => {
                notify(notices, NoticeKind::Error, rejected.to_string());
                return;
            }
            None => return,
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let report = crate::state::files::upload_sequentially(&batch.files, |staged| {
                let file = handles.with_value(|h| h.get(&staged.key).cloned());
                let paper_id = batch.paper_id.clone();
                async move {
                    match file {
                        Some(file) => api::upload_file(&paper_id, &file).await,
                        None => Err(crate::error::ApiError::Rejected("file is no longer available".to_owned())),
                    }
                }
            })
            .await;

            let kind = match report {
                crate::state::files::UploadReport::Completed { .. } => NoticeKind::Success,
                crate::state::files::UploadReport::Failed { .. } => NoticeKind::Error,
            };
            notify(notices, kind, report.message());
            if let Some(ticket) = files.try_update(|f| f.finish_upload(&batch, &report)).flatten() {
                load_submissions(role, ticket, files, notices);
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = batch;
    };

    let can_stage = move || files.with(|f| f.staged().len() < MAX_STAGED_FILES && !f.uploading());
    let can_upload = move || files.with(|f| !f.staged().is_empty() && !f.uploading());

    view! {
        <div class="upload-form">
            <label class="upload-form__picker" class:upload-form__picker--disabled=move || !can_stage()>
                "Add files"
                <input
                    type="file"
                    multiple=true
                    accept=ACCEPT_ATTR
                    disabled=move || !can_stage()
                    on:change=on_pick
                />
            </label>
            <p class="upload-form__hint">
                {format!("PDF or Word documents, up to {MAX_STAGED_FILES} files")}
            </p>
            <ul class="upload-form__staged">
                <For
                    each=move || files.with(|f| f.staged().to_vec())
                    key=|staged| staged.key
                    children=move |staged| {
                        let key = staged.key;
                        view! {
                            <li class="upload-form__file">
                                <span>{staged.name}</span>
                                <button
                                    class="btn btn--small"
                                    title="Remove"
                                    disabled=move || files.with(FilesState::uploading)
                                    on:click=move |_| on_remove(key)
                                >
                                    "×"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
            <button class="btn btn--primary" disabled=move || !can_upload() on:click=on_upload>
                {move || if files.with(FilesState::uploading) { "Uploading..." } else { "Upload" }}
            </button>
        </div>
    }
}

/// Submission list; reviewers get an Accept action on unaccepted entries.
#[component]
fn SubmissionList(role: Role) -> impl IntoView {
    let files = expect_context::<RwSignal<FilesState>>();

    view! {
        <Show
            when=move || !files.with(|f| f.loading)
            fallback=|| view! { <p class="file-manager__loader">"Loading submissions..."</p> }
        >
            <Show when=move || files.with(|f| f.error.is_some())>
                <p class="file-manager__error">{move || files.with(|f| f.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show
                when=move || files.with(|f| !f.submissions.is_empty())
                fallback=|| view! { <p class="file-manager__empty">"No submissions yet"</p> }
            >
                <ul class="file-manager__list">
                    <For
                        each=move || files.with(|f| f.submissions.clone())
                        key=|s| (s.id.clone(), s.accepted)
                        children=move |submission| {
                            let path = submission.file_url.clone();
                            let id = submission.id.clone();
                            let accepted = submission.accepted;
                            view! {
                                <li class="file-manager__item" class:file-manager__item--accepted=accepted>
                                    <button class="file-manager__open" on:click=move |_| open_submission(&path)>
                                        {submission_label(&submission)}
                                    </button>
                                    {match (role, accepted) {
                                        (_, true) => view! { <span class="badge badge--completed">"Accepted"</span> }.into_any(),
                                        (Role::Reviewer, false) => {
                                            view! {
                                                <button
                                                    class="btn btn--primary btn--small"
                                                    disabled=move || files.with(|f| *f.accept_phase() != AcceptPhase::Idle)
                                                    on:click=move |_| {
                                                        files.update(|f| {
                                                            f.request_accept(role, &id);
                                                        });
                                                    }
                                                >
                                                    "Accept"
                                                </button>
                                            }
                                                .into_any()
                                        }
                                        (Role::Author, false) => view! { <span class="badge badge--pending">"Pending"</span> }.into_any(),
                                    }}
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </Show>
    }
}

#[component]
fn ConfirmAcceptDialog(on_cancel: Callback<()>, on_confirm: Callback<()>) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Accept submission?"</h2>
                <p>"The author will be notified that this paper has been accepted. This cannot be undone."</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| on_confirm.run(())>
                        "Accept"
                    </button>
                </div>
            </div>
        </div>
    }
}
