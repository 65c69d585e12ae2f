//! Session context
//!
//! The one place that owns the access token. Transports read the token from
//! here for every request, pages sign in/out through it, and views that care
//! about logout subscribe to it instead of polling ambient storage.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::models::Role;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Signed-in session
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub username: Option<String>,
    pub role: Role,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("username", &self.username)
            .field("role", &self.role)
            .finish()
    }
}

/// Persistence for the session between runs
pub trait SessionStore: Send + Sync + fmt::Debug {
    fn load(&self) -> Result<Option<Session>, SessionStoreError>;
    fn save(&self, session: &Session) -> Result<(), SessionStoreError>;
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    file_path: PathBuf,
}

impl FileSessionStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match std::fs::remove_file(&self.file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Shared handle to the current session
///
/// Cheap to clone; all clones observe the same state.
#[derive(Clone)]
pub struct SessionContext {
    state: Arc<watch::Sender<Option<Session>>>,
    store: Option<Arc<dyn SessionStore>>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("session", &*self.state.borrow())
            .field("store", &self.store)
            .finish()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    /// In-memory session, nothing persisted.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            state: Arc::new(tx),
            store: None,
        }
    }

    /// Session backed by `store`, restoring whatever it holds.
    ///
    /// An unreadable store is logged and treated as signed out.
    pub fn restore(store: Arc<dyn SessionStore>) -> Self {
        let initial = match store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to restore session, starting signed out");
                None
            }
        };
        let (tx, _rx) = watch::channel(initial);
        Self {
            state: Arc::new(tx),
            store: Some(store),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().as_ref().map(|s| s.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.state
            .borrow()
            .as_ref()
            .and_then(|s| s.refresh_token.clone())
    }

    pub fn username(&self) -> Option<String> {
        self.state.borrow().as_ref().and_then(|s| s.username.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.state.borrow().as_ref().map(|s| s.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Observe sign-in and sign-out.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }

    pub fn sign_in(&self, session: Session) {
        self.persist(Some(&session));
        tracing::info!(username = ?session.username, role = %session.role, "Signed in");
        self.state.send_replace(Some(session));
    }

    pub fn sign_out(&self) {
        self.persist(None);
        if self.state.send_replace(None).is_some() {
            tracing::info!("Signed out");
        }
    }

    /// Replace the tokens of the current session after a refresh.
    ///
    /// Returns `false` when nobody is signed in.
    pub fn update_tokens(&self, access_token: String, refresh_token: Option<String>) -> bool {
        let mut updated = None;
        self.state.send_if_modified(|state| match state {
            Some(session) => {
                session.access_token = access_token;
                if refresh_token.is_some() {
                    session.refresh_token = refresh_token;
                }
                updated = Some(session.clone());
                true
            }
            None => false,
        });
        match updated {
            Some(session) => {
                self.persist(Some(&session));
                true
            }
            None => false,
        }
    }

    fn persist(&self, session: Option<&Session>) {
        let Some(store) = &self.store else {
            return;
        };
        let result = match session {
            Some(session) => store.save(session),
            None => store.clear(),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist session");
        }
    }
}
