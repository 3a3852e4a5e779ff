//! Account credential records for the auth endpoints.
//!
//! These are transient: filled in by a form, validated, submitted once,
//! then discarded. Nothing here is persisted client-side.

use serde::Serialize;

/// Payload for `POST /primary/auth/login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginCredentials {
    /// Either the account email or the username, 3–68 characters.
    pub email_or_username: String,
    /// Password, 6–18 characters, no whitespace.
    pub password: String,
}

/// Payload for `POST /primary/auth/register`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCredentials {
    /// Username, 3–30 characters from `[A-Za-z0-9._]`.
    pub username: String,
    /// Email address, 9–68 characters, `local@domain.tld` shape.
    pub email: String,
    /// Password, 6–18 characters, no whitespace.
    pub password: String,
}
