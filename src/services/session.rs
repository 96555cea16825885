// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle: login, registration, logout, forced expiry.
//!
//! The credential and identity live together in one [`Session`] value, so
//! they can never be set or cleared independently. An established session
//! is persisted to a state file and restored at engine init, surviving
//! restarts until explicit logout or a server-side rejection.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{AppError, Result};
use crate::services::GymApiClient;

/// The authenticated identity and bearer credential for the current user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub email: String,
}

#[derive(Default)]
struct SessionState {
    session: Option<Session>,
    /// Sticky "session expired" notice, distinct from a generic failure.
    expired_notice: bool,
}

/// Owns the session and performs the auth flows against the API.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct SessionManager {
    api: GymApiClient,
    state: Arc<RwLock<SessionState>>,
    session_file: PathBuf,
}

impl SessionManager {
    pub fn new(api: GymApiClient, session_file: PathBuf) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(SessionState::default())),
            session_file,
        }
    }

    // ─── Auth Flows ──────────────────────────────────────────────────────────

    /// Register a new account. Does not establish a session by itself.
    pub async fn register(&self, email: &str, password: &str) -> Result<()> {
        validate_credentials(email, password)?;
        self.api.register(email.trim(), password).await?;
        tracing::info!(email = email.trim(), "Account registered");
        Ok(())
    }

    /// Log in and establish a session.
    ///
    /// On success the session is held in memory and persisted to the state
    /// file; a failed persist is logged but does not fail the login.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        validate_credentials(email, password)?;

        let access_token = self.api.login(email.trim(), password).await?;
        let session = Session {
            access_token,
            email: email.trim().to_string(),
        };

        {
            let mut state = self.state.write().await;
            state.session = Some(session.clone());
            state.expired_notice = false;
        }

        if let Err(e) = save_session_file(&self.session_file, &session) {
            tracing::warn!(error = %e, "Failed to persist session, continuing anyway");
        }

        tracing::info!(email = %session.email, "Logged in");
        Ok(session)
    }

    /// Clear the session and its persisted state.
    pub async fn logout(&self) {
        let mut state = self.state.write().await;
        if let Some(session) = state.session.take() {
            tracing::info!(email = %session.email, "Logged out");
        }
        state.expired_notice = false;
        drop(state);

        remove_session_file(&self.session_file);
    }

    /// Forced teardown after the server rejected our credential.
    ///
    /// Same effect as [`logout`](Self::logout), plus a sticky expiry notice
    /// the view layer can show instead of a generic error. The next
    /// successful login clears the notice.
    pub async fn on_unauthorized(&self) {
        let mut state = self.state.write().await;
        if state.session.take().is_some() {
            tracing::warn!("Credential rejected by server, session cleared");
        }
        state.expired_notice = true;
        drop(state);

        remove_session_file(&self.session_file);
    }

    /// Restore a persisted session from the state file, if one exists.
    pub async fn restore(&self) {
        let Some(session) = load_session_file(&self.session_file) else {
            return;
        };

        tracing::info!(email = %session.email, "Restored persisted session");
        self.state.write().await.session = Some(session);
    }

    // ─── Read Accessors ──────────────────────────────────────────────────────

    /// The bearer token to attach to API calls, if authenticated.
    pub async fn credential(&self) -> Option<String> {
        self.state
            .read()
            .await
            .session
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// The display identity (email), present iff a credential is present.
    pub async fn identity(&self) -> Option<String> {
        self.state
            .read()
            .await
            .session
            .as_ref()
            .map(|s| s.email.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.session.is_some()
    }

    /// Whether the last teardown was a server-side credential rejection.
    pub async fn session_expired(&self) -> bool {
        self.state.read().await.expired_notice
    }
}

/// Presence check before any network round trip.
fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }
    Ok(())
}

// ─── State File ──────────────────────────────────────────────────────────────

/// Load the persisted session.
///
/// A missing, unreadable, or corrupt file yields the unauthenticated state;
/// the user just logs in again.
fn load_session_file(path: &Path) -> Option<Session> {
    if !path.exists() {
        return None;
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Unable to read session file");
            return None;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Unable to parse session file");
            None
        }
    }
}

/// Persist the session atomically: write a temp file in the same directory,
/// then rename over the target.
fn save_session_file(path: &Path, session: &Session) -> Result<()> {
    use std::io::Write;

    let parent = path
        .parent()
        .context("session file path has no parent directory")?;
    std::fs::create_dir_all(parent)
        .with_context(|| format!("creating state directory {}", parent.display()))?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .context("creating temporary session file")?;
    let contents =
        serde_json::to_string(session).context("serializing session")?;
    temp.write_all(contents.as_bytes())
        .context("writing session file")?;
    temp.as_file().sync_all().context("syncing session file")?;

    temp.persist(path)
        .map_err(|e| AppError::Internal(e.error.into()))?;

    tracing::debug!(path = %path.display(), "Session persisted");
    Ok(())
}

/// Remove the persisted session, tolerating a file that is already gone.
fn remove_session_file(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "Session file removed"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove session file");
        }
    }
}
