//! File manager state for the open room.
//!
//! DESIGN
//! ======
//! Authors stage up to [`MAX_STAGED_FILES`] files and upload them one request
//! at a time; the first failure ends the batch and earlier uploads stay
//! committed. Reviewers see the submission list and accept through a
//! confirm step. Submission fetches share the room-scoped [`LoadGuard`].
//!
//! Browser `File` handles are not stored here. Staged entries carry a key the
//! component uses to look up its own handle.

#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;

use std::future::Future;

use crate::error::ApiError;
use crate::net::types::{Role, Submission};
use crate::state::load::{LoadGuard, LoadOutcome, LoadTicket};

pub const MAX_STAGED_FILES: usize = 3;

/// Extensions the upload picker accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// `accept` attribute for the file input.
pub const ACCEPT_ATTR: &str = ".pdf,.doc,.docx";

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StageRejected {
    #[error("Maximum 3 files allowed")]
    Full,
    #[error("only PDF and Word documents can be uploaded")]
    UnsupportedType,
    #[error("only authors can upload files")]
    NotAuthor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejected {
    #[error("only authors can upload files")]
    NotAuthor,
    #[error("Paper ID not found for upload")]
    MissingPaperId,
    #[error("no files selected")]
    NothingStaged,
    #[error("an upload is already running")]
    InFlight,
}

/// A file waiting to be uploaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedFile {
    pub key: u64,
    pub name: String,
}

/// Files and target of one upload run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadBatch {
    ticket: LoadTicket,
    seq: u64,
    pub paper_id: String,
    pub files: Vec<StagedFile>,
}

/// How a sequential upload run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadReport {
    Completed { uploaded: usize },
    /// `attempt` is 1-based; files after it were never sent.
    Failed { attempt: usize, total: usize, file_name: String, error: ApiError },
}

impl UploadReport {
    /// Number of files the backend accepted before the run ended.
    #[must_use]
    pub fn uploaded(&self) -> usize {
        match self {
            Self::Completed { uploaded } => *uploaded,
            Self::Failed { attempt, .. } => attempt - 1,
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Completed { uploaded: 1 } => "File uploaded successfully".to_owned(),
            Self::Completed { uploaded } => format!("{uploaded} files uploaded successfully"),
            Self::Failed { attempt, total, file_name, error } => {
                format!("Upload {attempt} of {total} failed ({file_name}): {}", error.user_message())
            }
        }
    }
}

/// Upload `files` in order, one at a time, stopping at the first failure.
pub async fn upload_sequentially<F, Fut>(files: &[StagedFile], mut upload: F) -> UploadReport
where
    F: FnMut(&StagedFile) -> Fut,
    Fut: Future<Output = Result<(), ApiError>>,
{
    for (idx, file) in files.iter().enumerate() {
        if let Err(error) = upload(file).await {
            return UploadReport::Failed { attempt: idx + 1, total: files.len(), file_name: file.name.clone(), error };
        }
    }
    UploadReport::Completed { uploaded: files.len() }
}

/// Whether `name` has one of the [`ACCEPTED_EXTENSIONS`].
#[must_use]
pub fn is_accepted_file(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ACCEPTED_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}

/// Where the reviewer accept flow currently is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AcceptPhase {
    #[default]
    Idle,
    /// Confirmation modal open for this submission.
    Confirming(String),
    Accepting(String),
}

/// A confirmed accept awaiting the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingAccept {
    ticket: LoadTicket,
    pub submission_id: String,
}

impl PendingAccept {
    #[must_use]
    pub fn room_id(&self) -> &str {
        &self.ticket.room_id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// The submission list should be fetched again.
    Accepted,
    Failed(ApiError),
    Stale,
}

#[derive(Clone, Debug, Default)]
pub struct FilesState {
    guard: LoadGuard,
    pub submissions: Vec<Submission>,
    pub loading: bool,
    pub error: Option<String>,
    staged: Vec<StagedFile>,
    next_key: u64,
    upload_seq: u64,
    /// Sequence of the batch currently uploading.
    in_flight: Option<u64>,
    accept: AcceptPhase,
}

impl FilesState {
    #[must_use]
    pub fn staged(&self) -> &[StagedFile] {
        &self.staged
    }

    #[must_use]
    pub fn uploading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn accept_phase(&self) -> &AcceptPhase {
        &self.accept
    }

    #[must_use]
    pub fn room_id(&self) -> Option<&str> {
        self.guard.room_id()
    }

    /// Room-level check for mutations; a list reload in between does not
    /// make them stale.
    fn is_open(&self, ticket: &LoadTicket) -> bool {
        self.guard.room_id() == Some(ticket.room_id.as_str())
    }

    // ---------------------------------------------------------------------
    // Submission list
    // ---------------------------------------------------------------------

    /// Switch to `room_id`, discarding staged files and any accept in progress.
    ///
    /// Returns `None` when that room is already open.
    pub fn open_room(&mut self, room_id: &str) -> Option<LoadTicket> {
        if self.guard.room_id() == Some(room_id) {
            return None;
        }
        self.staged.clear();
        self.in_flight = None;
        self.accept = AcceptPhase::Idle;
        Some(self.begin_load(room_id))
    }

    /// Fetch the open room's submissions again.
    pub fn reload(&mut self) -> Option<LoadTicket> {
        let room_id = self.guard.room_id()?.to_owned();
        Some(self.begin_load(&room_id))
    }

    fn begin_load(&mut self, room_id: &str) -> LoadTicket {
        let ticket = self.guard.begin(room_id);
        self.submissions.clear();
        self.loading = true;
        self.error = None;
        ticket
    }

    pub fn finish_load(&mut self, ticket: &LoadTicket, result: Result<Vec<Submission>, ApiError>) -> LoadOutcome {
        if !self.guard.is_current(ticket) {
            return LoadOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(list) => {
                self.submissions = list;
                LoadOutcome::Applied(self.submissions.len())
            }
            Err(e) => {
                self.error = Some(e.user_message());
                LoadOutcome::Failed(e)
            }
        }
    }

    pub fn close(&mut self) {
        self.guard.invalidate();
        self.submissions.clear();
        self.staged.clear();
        self.loading = false;
        self.in_flight = None;
        self.error = None;
        self.accept = AcceptPhase::Idle;
    }

    // ---------------------------------------------------------------------
    // Staging + upload (authors)
    // ---------------------------------------------------------------------

    /// Stage a file by name and return its key.
    ///
    /// # Errors
    ///
    /// Rejects reviewers, unsupported extensions, and a stage beyond
    /// [`MAX_STAGED_FILES`].
    pub fn stage(&mut self, role: Role, name: &str) -> Result<u64, StageRejected> {
        match role {
            Role::Reviewer => return Err(StageRejected::NotAuthor),
            Role::Author => {}
        }
        if self.staged.len() >= MAX_STAGED_FILES {
            return Err(StageRejected::Full);
        }
        if !is_accepted_file(name) {
            return Err(StageRejected::UnsupportedType);
        }
        self.next_key = self.next_key.wrapping_add(1);
        self.staged.push(StagedFile { key: self.next_key, name: name.to_owned() });
        Ok(self.next_key)
    }

    /// Remove a staged file. Returns false if `key` is unknown or an upload is running.
    pub fn unstage(&mut self, key: u64) -> bool {
        if self.uploading() {
            return false;
        }
        let before = self.staged.len();
        self.staged.retain(|f| f.key != key);
        self.staged.len() != before
    }

    /// Freeze the staged files into a batch for `paper_id`.
    ///
    /// # Errors
    ///
    /// Returns [`UploadRejected`] when the caller is not an author, the paper
    /// id is blank, nothing is staged, or a batch is already running.
    pub fn begin_upload(&mut self, role: Role, paper_id: &str) -> Result<UploadBatch, UploadRejected> {
        match role {
            Role::Reviewer => return Err(UploadRejected::NotAuthor),
            Role::Author => {}
        }
        let paper_id = paper_id.trim();
        if paper_id.is_empty() {
            return Err(UploadRejected::MissingPaperId);
        }
        if self.staged.is_empty() {
            return Err(UploadRejected::NothingStaged);
        }
        if self.uploading() {
            return Err(UploadRejected::InFlight);
        }
        let ticket = self.guard.current().ok_or(UploadRejected::MissingPaperId)?;
        self.upload_seq = self.upload_seq.wrapping_add(1);
        self.in_flight = Some(self.upload_seq);
        Ok(UploadBatch { ticket, seq: self.upload_seq, paper_id: paper_id.to_owned(), files: self.staged.clone() })
    }

    /// Apply a finished batch: uploaded files leave staging.
    ///
    /// Returns a submission-list ticket when at least one file went through,
    /// or `None` when nothing was uploaded or `batch` is no longer the one in
    /// flight (the room was left, even if it was reopened since).
    pub fn finish_upload(&mut self, batch: &UploadBatch, report: &UploadReport) -> Option<LoadTicket> {
        if !self.is_open(&batch.ticket) || self.in_flight != Some(batch.seq) {
            return None;
        }
        self.in_flight = None;
        let done: Vec<u64> = batch.files.iter().take(report.uploaded()).map(|f| f.key).collect();
        self.staged.retain(|f| !done.contains(&f.key));
        if done.is_empty() { None } else { self.reload() }
    }

    // ---------------------------------------------------------------------
    // Accept (reviewers)
    // ---------------------------------------------------------------------

    /// First click on Accept: open the confirmation for `submission_id`.
    ///
    /// Returns false for authors, unknown or already accepted submissions, or
    /// while another accept is open.
    pub fn request_accept(&mut self, role: Role, submission_id: &str) -> bool {
        match role {
            Role::Author => false,
            Role::Reviewer => {
                let acceptable = self.submissions.iter().any(|s| s.id == submission_id && !s.accepted);
                if !acceptable || self.accept != AcceptPhase::Idle {
                    return false;
                }
                self.accept = AcceptPhase::Confirming(submission_id.to_owned());
                true
            }
        }
    }

    /// Dismiss the confirmation without accepting.
    pub fn cancel_accept(&mut self) {
        if matches!(self.accept, AcceptPhase::Confirming(_)) {
            self.accept = AcceptPhase::Idle;
        }
    }

    /// Confirm the open accept; the caller then issues the request.
    pub fn confirm_accept(&mut self, role: Role) -> Option<PendingAccept> {
        match role {
            Role::Author => None,
            Role::Reviewer => {
                let AcceptPhase::Confirming(id) = &self.accept else {
                    return None;
                };
                let submission_id = id.clone();
                let ticket = self.guard.current()?;
                self.accept = AcceptPhase::Accepting(submission_id.clone());
                Some(PendingAccept { ticket, submission_id })
            }
        }
    }

    pub fn finish_accept(&mut self, pending: &PendingAccept, result: Result<(), ApiError>) -> AcceptOutcome {
        if !self.is_open(&pending.ticket) {
            return AcceptOutcome::Stale;
        }
        self.accept = AcceptPhase::Idle;
        match result {
            Ok(()) => AcceptOutcome::Accepted,
            Err(e) => AcceptOutcome::Failed(e),
        }
    }
}
