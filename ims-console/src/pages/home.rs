//! End-user landing page

use ims_client::{Session, SessionContext};
use tokio::sync::watch;

use super::auth::Route;

#[derive(Debug)]
pub struct HomePage {
    session: SessionContext,
    updates: watch::Receiver<Option<Session>>,
}

impl HomePage {
    pub fn new(session: SessionContext) -> Self {
        let updates = session.subscribe();
        Self { session, updates }
    }

    pub fn username(&self) -> Option<String> {
        self.session.username()
    }

    pub fn greeting(&self) -> String {
        match self.username() {
            Some(name) => format!("Welcome, {}!", name),
            None => "Welcome!".to_string(),
        }
    }

    /// Resolve once the session is cleared, from this page or any other.
    pub async fn wait_for_logout(&mut self) -> Route {
        if let Err(e) = self.updates.wait_for(Option::is_none).await {
            tracing::debug!(error = %e, "Session channel closed");
        }
        Route::Login
    }
}
