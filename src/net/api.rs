//! REST API helpers for the paper-review backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, credentialed with
//! the session cookie and raced against the configured request timeout.
//! Server-side (SSR): stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. Application-level failures
//! (`success: false`, non-200 `code`) are mapped to `ApiError::Rejected` here
//! so callers handle one error path.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{ChatRoom, Message, Role, Submission, User};
use crate::error::ApiError;
#[cfg(any(test, feature = "hydrate"))]
use super::types::{MessagesEnvelope, RoomsEnvelope, SubmissionsEnvelope};

/// Fixed description tag attached to every uploaded paper file.
pub const UPLOAD_DESCRIPTION: &str = "paper_upload";

// =============================================================================
// ENDPOINTS
// =============================================================================

#[cfg(any(test, feature = "hydrate"))]
fn login_endpoint(base: &str, role: Role) -> String {
    format!("{base}/api/auth/{}/login", role.as_str())
}

#[cfg(any(test, feature = "hydrate"))]
fn profile_endpoint(base: &str, role: Role) -> String {
    match role {
        Role::Author => format!("{base}/api/auth/user/profile"),
        Role::Reviewer => format!("{base}/api/auth/reviewer/status"),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn logout_endpoint(base: &str) -> String {
    format!("{base}/api/auth/logout")
}

#[cfg(any(test, feature = "hydrate"))]
fn rooms_endpoint(base: &str, role: Role) -> String {
    format!("{base}/api/events/paper/{}/chats", role.as_str())
}

#[cfg(any(test, feature = "hydrate"))]
fn messages_endpoint(base: &str, role: Role, room_id: &str) -> String {
    format!("{base}/api/events/paper/{}/messages/{room_id}", role.as_str())
}

#[cfg(any(test, feature = "hydrate"))]
fn submissions_endpoint(base: &str, role: Role, room_id: &str) -> String {
    format!("{base}/api/events/paper/{}/submissions/{room_id}", role.as_str())
}

#[cfg(any(test, feature = "hydrate"))]
fn accept_endpoint(base: &str, room_id: &str) -> String {
    submissions_endpoint(base, Role::Reviewer, room_id)
}

#[cfg(any(test, feature = "hydrate"))]
fn upload_endpoint(base: &str, paper_id: &str) -> String {
    format!("{base}/api/events/paper/{paper_id}/upload")
}

/// Absolute URL for opening a submitted file.
#[must_use]
pub fn file_url(base: &str, file_path: &str) -> String {
    if file_path.starts_with("http://") || file_path.starts_with("https://") {
        return file_path.to_owned();
    }
    if file_path.starts_with('/') {
        format!("{base}{file_path}")
    } else {
        format!("{base}/{file_path}")
    }
}

// =============================================================================
// PAYLOADS + ENVELOPES
// =============================================================================

#[cfg(any(test, feature = "hydrate"))]
fn send_message_payload(role: Role, text: &str, timestamp: &str) -> serde_json::Value {
    serde_json::json!({ "message": text, "sender": role.as_str(), "timestamp": timestamp })
}

#[cfg(any(test, feature = "hydrate"))]
fn login_payload(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "email": email, "password": password })
}

#[cfg(any(test, feature = "hydrate"))]
fn rooms_from_envelope(env: RoomsEnvelope) -> Result<Vec<ChatRoom>, ApiError> {
    if env.success { Ok(env.chats) } else { Err(ApiError::Rejected("Failed to fetch chatrooms".to_owned())) }
}

#[cfg(any(test, feature = "hydrate"))]
fn messages_from_envelope(env: MessagesEnvelope) -> Result<Vec<Message>, ApiError> {
    if env.success { Ok(env.messages) } else { Err(ApiError::Rejected("Failed to fetch messages".to_owned())) }
}

#[cfg(any(test, feature = "hydrate"))]
fn submissions_from_envelope(env: SubmissionsEnvelope) -> Result<Vec<Submission>, ApiError> {
    match env.submissions {
        Some(list) if env.success => Ok(list),
        _ => Err(ApiError::Rejected("Failed to load submissions".to_owned())),
    }
}

// =============================================================================
// HTTP PLUMBING
// =============================================================================

#[cfg(feature = "hydrate")]
mod http {
    use futures::future::{Either, select};
    use gloo_net::http::{Request, RequestBuilder, Response};
    use serde::de::DeserializeOwned;
    use web_sys::RequestCredentials;

    use crate::error::ApiError;
    use crate::net::types::Ack;

    pub(super) fn get(url: &str) -> RequestBuilder {
        Request::get(url).credentials(RequestCredentials::Include)
    }

    pub(super) fn post(url: &str) -> RequestBuilder {
        Request::post(url).credentials(RequestCredentials::Include)
    }

    /// Send `request`, failing with [`ApiError::Timeout`] if no response
    /// arrives within the configured window.
    pub(super) async fn send(request: Request) -> Result<Response, ApiError> {
        let timeout_ms = crate::config::client().request_timeout_ms;
        let call = Box::pin(request.send());
        let timer = Box::pin(gloo_timers::future::TimeoutFuture::new(timeout_ms));
        match select(call, timer).await {
            Either::Left((result, _)) => result.map_err(|e| ApiError::Transport(e.to_string())),
            Either::Right(((), _)) => Err(ApiError::Timeout { after_ms: timeout_ms }),
        }
    }

    pub(super) async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(super) async fn read_ack(resp: Response, fallback: &str) -> Result<(), ApiError> {
        read_json::<Ack>(resp).await?.into_result(fallback)
    }

    pub(super) fn build_err(e: gloo_net::Error) -> ApiError {
        ApiError::Transport(e.to_string())
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// Sign in with email and password via `POST /api/auth/{role}/login`.
///
/// # Errors
///
/// Returns an error if the request fails or the response carries a non-200 `code`.
pub async fn login(role: Role, email: &str, password: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = login_endpoint(&crate::config::client().auth_base_url, role);
        let request = http::post(&url).json(&login_payload(email, password)).map_err(http::build_err)?;
        let resp = http::send(request).await?;
        http::read_ack(resp, "Login failed").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (role, email, password);
        Err(ApiError::Unavailable)
    }
}

/// Fetch the signed-in user's profile for `role`.
///
/// # Errors
///
/// Returns an error if the request fails or no user is signed in for `role`.
pub async fn fetch_profile(role: Role) -> Result<User, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = profile_endpoint(&crate::config::client().auth_base_url, role);
        let request = http::get(&url).build().map_err(http::build_err)?;
        let resp = http::send(request).await?;
        let env: super::types::ProfileEnvelope = http::read_json(resp).await?;
        env.into_user(role).ok_or_else(|| ApiError::Rejected("not signed in".to_owned()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = role;
        Err(ApiError::Unavailable)
    }
}

/// End the session via `POST /api/auth/logout`. Failures are logged and ignored.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let url = logout_endpoint(&crate::config::client().auth_base_url);
        let result = match http::post(&url).json(&serde_json::json!({})) {
            Ok(request) => http::send(request).await.map(|_| ()),
            Err(e) => Err(http::build_err(e)),
        };
        if let Err(e) = result {
            leptos::logging::warn!("logout failed: {e}");
        }
    }
}

// =============================================================================
// ROOMS + MESSAGES
// =============================================================================

/// List the review rooms visible to `role`.
///
/// # Errors
///
/// Returns an error if the request fails or the backend reports failure.
pub async fn fetch_rooms(role: Role) -> Result<Vec<ChatRoom>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = rooms_endpoint(&crate::config::client().events_base_url, role);
        let request = http::get(&url).build().map_err(http::build_err)?;
        let resp = http::send(request).await?;
        rooms_from_envelope(http::read_json(resp).await?)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = role;
        Err(ApiError::Unavailable)
    }
}

/// Fetch the full transcript of `room_id`.
///
/// # Errors
///
/// Returns an error if the request fails or the backend reports failure.
pub async fn fetch_messages(role: Role, room_id: &str) -> Result<Vec<Message>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = messages_endpoint(&crate::config::client().events_base_url, role, room_id);
        let request = http::get(&url).build().map_err(http::build_err)?;
        let resp = http::send(request).await?;
        messages_from_envelope(http::read_json(resp).await?)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (role, room_id);
        Err(ApiError::Unavailable)
    }
}

/// Post a message to `room_id` as `role`.
///
/// # Errors
///
/// Returns an error if the request fails or the backend reports failure.
pub async fn send_message(role: Role, room_id: &str, text: &str, timestamp: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = messages_endpoint(&crate::config::client().events_base_url, role, room_id);
        let request = http::post(&url)
            .json(&send_message_payload(role, text, timestamp))
            .map_err(http::build_err)?;
        let resp = http::send(request).await?;
        http::read_ack(resp, "Failed to send message").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (role, room_id, text, timestamp);
        Err(ApiError::Unavailable)
    }
}

// =============================================================================
// SUBMISSIONS
// =============================================================================

/// List submissions attached to `room_id`'s paper.
///
/// # Errors
///
/// Returns an error if the request fails or the backend reports failure.
pub async fn fetch_submissions(role: Role, room_id: &str) -> Result<Vec<Submission>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = submissions_endpoint(&crate::config::client().events_base_url, role, room_id);
        let request = http::get(&url).build().map_err(http::build_err)?;
        let resp = http::send(request).await?;
        submissions_from_envelope(http::read_json(resp).await?)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (role, room_id);
        Err(ApiError::Unavailable)
    }
}

/// Upload one paper file as multipart form data tagged with [`UPLOAD_DESCRIPTION`].
///
/// # Errors
///
/// Returns an error if the form cannot be built, the request fails, or the
/// backend reports failure.
#[cfg(feature = "hydrate")]
pub async fn upload_file(paper_id: &str, file: &web_sys::File) -> Result<(), ApiError> {
    let form = web_sys::FormData::new().map_err(|e| ApiError::Transport(format!("{e:?}")))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| ApiError::Transport(format!("{e:?}")))?;
    form.append_with_str("description", UPLOAD_DESCRIPTION)
        .map_err(|e| ApiError::Transport(format!("{e:?}")))?;

    let url = upload_endpoint(&crate::config::client().events_base_url, paper_id);
    let request = http::post(&url).body(form).map_err(http::build_err)?;
    let resp = http::send(request).await?;
    http::read_ack(resp, "Upload failed").await
}

/// Mark the pending submission of `room_id` as accepted (reviewer only).
///
/// # Errors
///
/// Returns an error if the request fails or the backend reports failure.
pub async fn accept_submission(room_id: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = accept_endpoint(&crate::config::client().events_base_url, room_id);
        let request = http::post(&url).build().map_err(http::build_err)?;
        let resp = http::send(request).await?;
        http::read_ack(resp, "Failed to accept submission").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = room_id;
        Err(ApiError::Unavailable)
    }
}
