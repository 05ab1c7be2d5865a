//! Wire DTOs for the paper-review backend.
//!
//! DESIGN
//! ======
//! Field names follow the backend's JSON (`_id`, `sender_type`, `userName`)
//! through serde renames so the rest of the crate can use domain names.
//! Missing optional fields default instead of failing the whole list.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// Acting role of the signed-in user.
///
/// Serializes as the backend's role flag (`"user"` for authors), which is also
/// the path segment used by role-scoped endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    Author,
    #[serde(rename = "reviewer")]
    Reviewer,
}

impl Role {
    /// Wire flag and URL path segment for this role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Author => "user",
            Self::Reviewer => "reviewer",
        }
    }

    /// Parse a stored or wire role flag.
    #[must_use]
    pub fn from_flag(raw: &str) -> Option<Self> {
        match raw.trim() {
            "user" | "author" => Some(Self::Author),
            "reviewer" => Some(Self::Reviewer),
            _ => None,
        }
    }

    /// Route that hosts this role's dashboard.
    #[must_use]
    pub fn home_path(self) -> &'static str {
        match self {
            Self::Author => "/author",
            Self::Reviewer => "/reviewer",
        }
    }

    /// How this role refers to the other side of a room.
    #[must_use]
    pub fn counterpart_label(self) -> &'static str {
        match self {
            Self::Author => "reviewer",
            Self::Reviewer => "submitter",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Author => "Author",
            Self::Reviewer => "Reviewer",
        }
    }
}

/// Lifecycle status of a review room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Pending,
    Completed,
    Declined,
}

impl RoomStatus {
    /// Only pending rooms accept new messages.
    #[must_use]
    pub fn accepts_messages(self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Declined => "declined",
        }
    }
}

/// A single chat message in a room transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Server identifier; absent for messages appended locally this session.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "message")]
    pub text: String,
    #[serde(rename = "sender_type")]
    pub sender: Role,
    /// ISO-8601 creation timestamp.
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

/// A paper-review room pairing an author (or team) with a reviewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoom {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub paper_id: String,
    #[serde(default)]
    pub paper_name: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub hall: String,
    #[serde(default)]
    pub rules: String,
    #[serde(default, deserialize_with = "deserialize_u32_lenient")]
    pub team_size: u32,
    #[serde(default)]
    pub tagline: String,
    #[serde(rename = "userName", default)]
    pub author_name: String,
    #[serde(rename = "userEmail", default)]
    pub author_email: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub reviewer_name: Option<String>,
    #[serde(default)]
    pub status: RoomStatus,
}

impl ChatRoom {
    /// Name of the other party in this room, as seen by `role`.
    #[must_use]
    pub fn counterparty_name(&self, role: Role) -> Option<&str> {
        match role {
            Role::Reviewer => Some(self.author_name.as_str()),
            Role::Author => self.reviewer_name.as_deref().or(self.team_name.as_deref()),
        }
    }
}

/// A submitted paper file attached to a room's paper.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub paper_id: String,
    #[serde(default)]
    pub user_id: String,
    pub file_url: String,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// The signed-in user as resolved from the profile endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
}

impl User {
    /// Name for headers and menus, falling back to the email address.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or(&self.email)
    }
}

// =============================================================================
// RESPONSE ENVELOPES
// =============================================================================

/// Common `{ success, message }` acknowledgement.
///
/// Login responses use `{ code, msg }` instead; a present `code` other than
/// 200 is a failure even when the HTTP status is OK.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl Ack {
    /// Convert the envelope into an application-level result.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when `success` is false or `code` is not 200.
    pub fn into_result(self, fallback: &str) -> Result<(), ApiError> {
        if let Some(code) = self.code {
            if code != 200 {
                return Err(ApiError::Rejected(self.msg.or(self.message).unwrap_or_else(|| fallback.to_owned())));
            }
        }
        if self.success == Some(false) {
            return Err(ApiError::Rejected(self.message.or(self.msg).unwrap_or_else(|| fallback.to_owned())));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RoomsEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub chats: Vec<ChatRoom>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MessagesEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SubmissionsEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub submissions: Option<Vec<Submission>>,
}

/// Profile payload; `id` may arrive as `uniqueId` for authors.
#[derive(Clone, Debug, Deserialize)]
pub struct ProfileEnvelope {
    pub user: Option<ProfileUser>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl ProfileEnvelope {
    /// Resolve the profile into a [`User`], defaulting the role to the one
    /// the profile was requested for.
    #[must_use]
    pub fn into_user(self, requested: Role) -> Option<User> {
        let raw = self.user?;
        let id = raw.id.or(raw.unique_id)?;
        let role = raw.role.as_deref().and_then(Role::from_flag).unwrap_or(requested);
        Some(User { id, email: raw.email, name: raw.name, role })
    }
}

fn deserialize_u32_lenient<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()).unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
