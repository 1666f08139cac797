//! Wire-schema DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! `Identity` has private fields and no constructor: the only way to obtain
//! one is to decode the backend's answer to "who is this credential". That
//! keeps the session invariant (authenticated implies a server-verified
//! identity) enforceable by the type system. `UserSummary` carries the same
//! wire shape for admin listings but is deliberately a different type so a
//! listed user can never be logged in as.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Authorization level attached to a user record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    /// Regular user. Unknown role strings also land here (least privilege).
    #[default]
    #[serde(rename = "user")]
    #[serde(other)]
    Member,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Member => "Member",
        }
    }
}

/// The verified user behind the current credential, as returned by `/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Identity {
    id: String,
    email: String,
    #[serde(rename = "name")]
    display_name: String,
    #[serde(default)]
    role: Role,
    #[serde(rename = "workspace_domain", default)]
    organizational_domain: String,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    updated_at: String,
}

impl Identity {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Google Workspace domain (or email domain) the account belongs to.
    pub fn organizational_domain(&self) -> &str {
        &self.organizational_domain
    }

    /// ISO 8601 creation timestamp.
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// ISO 8601 last-update timestamp.
    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }
}

/// A user record in the admin listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub workspace_domain: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Error body returned by the backend on non-2xx responses.
///
/// Some handlers only send `{ "error": ... }`, so every field is optional on
/// the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub code: u16,
}

/// Body of `POST /auth/refresh`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Body of `GET /users`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserListResponse {
    #[serde(default)]
    pub users: Vec<UserSummary>,
}

/// Body of `POST /users/{id}/promote`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PromoteResponse {
    #[serde(default)]
    pub message: String,
    pub user: UserSummary,
}
