//! Session token persistence for `TaskDeck`.
//!
//! The browser client kept its bearer token in a cookie with a 7-day
//! expiry; here the token lives in a small JSON file next to the other
//! app data, with the same expiry semantics. An expired or unreadable
//! token behaves like a missing one: the user is simply asked to log in
//! again.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Errors that can occur while loading or saving the session token.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to read or write the token file.
    #[error("token file {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to serialize the token record.
    #[error("token serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Trait for persistent session token storage.
pub trait TokenStore {
    /// Load the stored token.
    ///
    /// Returns `None` if no token exists or the stored one has expired.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if storage is inaccessible.
    fn load(&self) -> Result<Option<String>, SessionError>;

    /// Save a token, stamping a fresh expiry.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the token cannot be persisted.
    fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Remove any stored token (logout).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the stored token cannot be removed.
    fn clear(&self) -> Result<(), SessionError>;
}

/// On-disk token record.
#[derive(Debug, Serialize, Deserialize)]
struct TokenRecord {
    token: String,
    expires_at: DateTime<Utc>,
}

/// File-backed [`TokenStore`].
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    ttl_days: i64,
}

impl FileTokenStore {
    /// Create a store at an explicit path with the given token lifetime.
    #[must_use]
    pub const fn new(path: PathBuf, ttl_days: i64) -> Self {
        Self { path, ttl_days }
    }

    /// Default token file location (`<data dir>/taskdeck/session.json`).
    ///
    /// Returns `None` when the platform has no data directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::data_dir()?.join("taskdeck").join("session.json"))
    }

    fn io_err(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_err(e)),
        };

        let Ok(record) = serde_json::from_str::<TokenRecord>(&contents) else {
            // Corrupt file: treat like a missing token.
            tracing::warn!(path = %self.path.display(), "discarding unreadable token file");
            self.clear()?;
            return Ok(None);
        };

        if record.expires_at <= Utc::now() {
            tracing::info!("stored session token expired");
            self.clear()?;
            return Ok(None);
        }

        Ok(Some(record.token))
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let record = TokenRecord {
            token: token.to_string(),
            expires_at: Utc::now() + Duration::days(self.ttl_days),
        };
        let contents = serde_json::to_string_pretty(&record)?;
        std::fs::write(&self.path, contents).map_err(|e| self.io_err(e))
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_err(e)),
        }
    }
}

/// In-memory [`TokenStore`] for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: std::sync::Mutex<Option<String>>,
}

impl InMemoryTokenStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl TokenStore for InMemoryTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.slot().clone())
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot() = None;
        Ok(())
    }
}

/// Resolve the token file path from config, falling back to the default
/// location.
#[must_use]
pub fn resolve_store(path: Option<&Path>, ttl_days: i64) -> Option<FileTokenStore> {
    let path = path.map_or_else(FileTokenStore::default_path, |p| Some(p.to_path_buf()))?;
    Some(FileTokenStore::new(path, ttl_days))
}
