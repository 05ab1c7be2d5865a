use std::cell::RefCell;

use super::*;

fn submission(id: &str, accepted: bool) -> Submission {
    serde_json::from_value(serde_json::json!({
        "_id": id,
        "paperId": "P-001",
        "fileUrl": format!("/uploads/{id}.pdf"),
        "accepted": accepted
    }))
    .unwrap()
}

fn opened(room_id: &str, list: Vec<Submission>) -> FilesState {
    let mut state = FilesState::default();
    let ticket = state.open_room(room_id).unwrap();
    state.finish_load(&ticket, Ok(list));
    state
}

fn staged(names: &[&str]) -> Vec<StagedFile> {
    names
        .iter()
        .zip(1..)
        .map(|(name, key)| StagedFile { key, name: (*name).to_owned() })
        .collect()
}

// =============================================================
// Staging
// =============================================================

#[test]
fn fourth_staged_file_is_rejected() {
    let mut state = opened("r1", Vec::new());
    for name in ["a.pdf", "b.docx", "c.doc"] {
        state.stage(Role::Author, name).unwrap();
    }
    assert_eq!(state.stage(Role::Author, "d.pdf"), Err(StageRejected::Full));
    assert_eq!(state.staged().len(), MAX_STAGED_FILES);
}

#[test]
fn reviewers_cannot_stage() {
    let mut state = opened("r1", Vec::new());
    assert_eq!(state.stage(Role::Reviewer, "a.pdf"), Err(StageRejected::NotAuthor));
    assert!(state.staged().is_empty());
}

#[test]
fn unsupported_extensions_are_rejected() {
    let mut state = opened("r1", Vec::new());
    assert_eq!(state.stage(Role::Author, "notes.txt"), Err(StageRejected::UnsupportedType));
    assert_eq!(state.stage(Role::Author, "noext"), Err(StageRejected::UnsupportedType));
    assert!(state.stage(Role::Author, "Paper.PDF").is_ok());
}

#[test]
fn unstage_frees_a_slot() {
    let mut state = opened("r1", Vec::new());
    let first = state.stage(Role::Author, "a.pdf").unwrap();
    state.stage(Role::Author, "b.pdf").unwrap();
    state.stage(Role::Author, "c.pdf").unwrap();
    assert!(state.unstage(first));
    assert!(!state.unstage(first));
    assert!(state.stage(Role::Author, "d.pdf").is_ok());
    assert_eq!(state.staged().iter().map(|f| f.name.as_str()).collect::<Vec<_>>(), vec!["b.pdf", "c.pdf", "d.pdf"]);
}

#[test]
fn room_switch_discards_staged_files() {
    let mut state = opened("r1", Vec::new());
    state.stage(Role::Author, "a.pdf").unwrap();
    state.open_room("r2").unwrap();
    assert!(state.staged().is_empty());
}

// =============================================================
// Sequential upload
// =============================================================

#[test]
fn failure_at_second_file_stops_the_batch() {
    let files = staged(&["one.pdf", "two.pdf", "three.pdf"]);
    let attempted = RefCell::new(Vec::new());

    let report = futures::executor::block_on(upload_sequentially(&files, |file| {
        attempted.borrow_mut().push(file.name.clone());
        let result = if file.name == "two.pdf" { Err(ApiError::Rejected("disk full".to_owned())) } else { Ok(()) };
        async move { result }
    }));

    assert_eq!(attempted.into_inner(), vec!["one.pdf", "two.pdf"]);
    assert_eq!(
        report,
        UploadReport::Failed {
            attempt: 2,
            total: 3,
            file_name: "two.pdf".to_owned(),
            error: ApiError::Rejected("disk full".to_owned()),
        }
    );
    assert_eq!(report.uploaded(), 1);
    assert_eq!(report.message(), "Upload 2 of 3 failed (two.pdf): disk full");
}

#[test]
fn successful_batch_uploads_everything_in_order() {
    let files = staged(&["one.pdf", "two.pdf"]);
    let attempted = RefCell::new(Vec::new());
    let report = futures::executor::block_on(upload_sequentially(&files, |file| {
        attempted.borrow_mut().push(file.key);
        async { Ok(()) }
    }));
    assert_eq!(attempted.into_inner(), vec![1, 2]);
    assert_eq!(report, UploadReport::Completed { uploaded: 2 });
    assert_eq!(report.message(), "2 files uploaded successfully");
}

#[test]
fn partial_failure_keeps_only_unsent_files_staged() {
    let mut state = opened("r1", Vec::new());
    for name in ["one.pdf", "two.pdf", "three.pdf"] {
        state.stage(Role::Author, name).unwrap();
    }
    let batch = state.begin_upload(Role::Author, "P-001").unwrap();
    assert!(state.uploading());

    let report = UploadReport::Failed {
        attempt: 2,
        total: 3,
        file_name: "two.pdf".to_owned(),
        error: ApiError::Transport("offline".to_owned()),
    };
    let refetch = state.finish_upload(&batch, &report);

    assert!(refetch.is_some());
    assert!(!state.uploading());
    assert_eq!(state.staged().iter().map(|f| f.name.as_str()).collect::<Vec<_>>(), vec!["two.pdf", "three.pdf"]);
}

#[test]
fn completed_batch_clears_staging_and_refetches() {
    let mut state = opened("r1", vec![submission("s1", false)]);
    state.stage(Role::Author, "one.pdf").unwrap();
    let batch = state.begin_upload(Role::Author, "P-001").unwrap();
    let ticket = state.finish_upload(&batch, &UploadReport::Completed { uploaded: 1 }).unwrap();

    assert!(state.staged().is_empty());
    assert!(state.loading);
    assert_eq!(state.finish_load(&ticket, Ok(vec![submission("s1", false), submission("s2", false)])), LoadOutcome::Applied(2));
}

#[test]
fn failure_on_first_file_does_not_refetch() {
    let mut state = opened("r1", Vec::new());
    state.stage(Role::Author, "one.pdf").unwrap();
    let batch = state.begin_upload(Role::Author, "P-001").unwrap();
    let report = UploadReport::Failed {
        attempt: 1,
        total: 1,
        file_name: "one.pdf".to_owned(),
        error: ApiError::Transport("offline".to_owned()),
    };
    assert!(state.finish_upload(&batch, &report).is_none());
    assert_eq!(state.staged().len(), 1);
}

#[test]
fn begin_upload_validates_before_any_request() {
    let mut state = opened("r1", Vec::new());
    assert_eq!(state.begin_upload(Role::Author, "P-001"), Err(UploadRejected::NothingStaged));
    state.stage(Role::Author, "one.pdf").unwrap();
    assert_eq!(state.begin_upload(Role::Author, "  "), Err(UploadRejected::MissingPaperId));
    assert_eq!(state.begin_upload(Role::Reviewer, "P-001"), Err(UploadRejected::NotAuthor));

    let _batch = state.begin_upload(Role::Author, "P-001").unwrap();
    assert_eq!(state.begin_upload(Role::Author, "P-001"), Err(UploadRejected::InFlight));
    assert!(!state.unstage(1));
}

#[test]
fn missing_paper_id_message_is_user_facing() {
    assert_eq!(UploadRejected::MissingPaperId.to_string(), "Paper ID not found for upload");
}

#[test]
fn upload_finishing_after_room_switch_is_ignored() {
    let mut state = opened("r1", Vec::new());
    state.stage(Role::Author, "one.pdf").unwrap();
    let batch = state.begin_upload(Role::Author, "P-001").unwrap();
    state.open_room("r2").unwrap();
    assert!(state.finish_upload(&batch, &UploadReport::Completed { uploaded: 1 }).is_none());
    assert_eq!(state.room_id(), Some("r2"));
}

#[test]
fn earlier_batch_cannot_release_a_reopened_rooms_upload() {
    let mut state = opened("A", Vec::new());
    state.stage(Role::Author, "one.pdf").unwrap();
    let first = state.begin_upload(Role::Author, "P-001").unwrap();

    state.open_room("B").unwrap();
    state.open_room("A").unwrap();
    state.stage(Role::Author, "two.pdf").unwrap();
    let second = state.begin_upload(Role::Author, "P-001").unwrap();

    assert!(state.finish_upload(&first, &UploadReport::Completed { uploaded: 1 }).is_none());
    assert!(state.uploading());
    assert_eq!(state.begin_upload(Role::Author, "P-001"), Err(UploadRejected::InFlight));
    assert!(!state.unstage(second.files[0].key));
    assert_eq!(state.staged().len(), 1);

    assert!(state.finish_upload(&second, &UploadReport::Completed { uploaded: 1 }).is_some());
    assert!(!state.uploading());
    assert!(state.staged().is_empty());
}

// =============================================================
// Accept
// =============================================================

#[test]
fn author_cannot_start_accept() {
    let mut state = opened("r1", vec![submission("s1", false)]);
    assert!(!state.request_accept(Role::Author, "s1"));
    assert_eq!(state.accept_phase(), &AcceptPhase::Idle);
    assert!(state.confirm_accept(Role::Author).is_none());
}

#[test]
fn reviewer_accept_requires_confirmation() {
    let mut state = opened("r1", vec![submission("s1", false)]);
    assert!(state.confirm_accept(Role::Reviewer).is_none());

    assert!(state.request_accept(Role::Reviewer, "s1"));
    assert_eq!(state.accept_phase(), &AcceptPhase::Confirming("s1".to_owned()));

    let pending = state.confirm_accept(Role::Reviewer).unwrap();
    assert_eq!(pending.submission_id, "s1");
    assert_eq!(pending.room_id(), "r1");
    assert_eq!(state.accept_phase(), &AcceptPhase::Accepting("s1".to_owned()));

    assert_eq!(state.finish_accept(&pending, Ok(())), AcceptOutcome::Accepted);
    assert_eq!(state.accept_phase(), &AcceptPhase::Idle);
}

#[test]
fn cancel_closes_confirmation_without_request() {
    let mut state = opened("r1", vec![submission("s1", false)]);
    assert!(state.request_accept(Role::Reviewer, "s1"));
    state.cancel_accept();
    assert_eq!(state.accept_phase(), &AcceptPhase::Idle);
    assert!(state.confirm_accept(Role::Reviewer).is_none());
}

#[test]
fn accepted_or_unknown_submissions_cannot_be_accepted() {
    let mut state = opened("r1", vec![submission("s1", true)]);
    assert!(!state.request_accept(Role::Reviewer, "s1"));
    assert!(!state.request_accept(Role::Reviewer, "missing"));
}

#[test]
fn failed_accept_returns_to_idle() {
    let mut state = opened("r1", vec![submission("s1", false)]);
    state.request_accept(Role::Reviewer, "s1");
    let pending = state.confirm_accept(Role::Reviewer).unwrap();
    let err = ApiError::Status { status: 500, message: "boom".to_owned() };
    assert_eq!(state.finish_accept(&pending, Err(err.clone())), AcceptOutcome::Failed(err));
    assert_eq!(state.accept_phase(), &AcceptPhase::Idle);
}

#[test]
fn accept_result_after_room_switch_is_stale() {
    let mut state = opened("r1", vec![submission("s1", false)]);
    state.request_accept(Role::Reviewer, "s1");
    let pending = state.confirm_accept(Role::Reviewer).unwrap();
    state.open_room("r2").unwrap();
    assert_eq!(state.finish_accept(&pending, Ok(())), AcceptOutcome::Stale);
}

// =============================================================
// Submission list
// =============================================================

#[test]
fn stale_submission_list_is_discarded() {
    let mut state = FilesState::default();
    let first = state.open_room("r1").unwrap();
    let second = state.open_room("r2").unwrap();
    assert_eq!(state.finish_load(&first, Ok(vec![submission("s1", false)])), LoadOutcome::Stale);
    assert!(state.submissions.is_empty());
    assert_eq!(state.finish_load(&second, Ok(Vec::new())), LoadOutcome::Applied(0));
}

#[test]
fn reopening_same_room_issues_no_fetch() {
    let mut state = opened("r1", Vec::new());
    assert!(state.open_room("r1").is_none());
}

#[test]
fn failed_list_load_records_error() {
    let mut state = FilesState::default();
    let ticket = state.open_room("r1").unwrap();
    state.finish_load(&ticket, Err(ApiError::Rejected("Failed to load submissions".to_owned())));
    assert_eq!(state.error.as_deref(), Some("Failed to load submissions"));
    assert!(!state.loading);
}
