//! Explicit session state.
//!
//! Authentication state is modeled as a small state machine instead of a
//! token-in-a-drawer: pages ask the session who is signed in, and the
//! session is the only place that transitions between signed-out and
//! signed-in. A 401 from any page funnels back through
//! [`Session::note_failure`], which drops the session rather than letting
//! pages keep firing doomed requests.
//!
//! ```text
//!                 sign_in(user, pass)
//!   ┌───────────┐ ──────────────────► ┌────────────────────┐
//!   │ SignedOut │                     │ SignedIn(username,  │
//!   │           │ ◄────────────────── │          role)      │
//!   └───────────┘  sign_out() /       └────────────────────┘
//!                  any 401 response
//! ```

use kirana_client::ApiClient;
use kirana_core::types::CurrentUser;
use tracing::{info, warn};

use crate::error::{AdminError, AdminResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    SignedOut,
    SignedIn(CurrentUser),
}

pub struct Session {
    client: ApiClient,
    state: SessionState,
}

impl Session {
    /// A fresh session. Always starts signed out; any token left on disk
    /// from a previous run is replaced on the next successful sign-in.
    pub fn new(client: ApiClient) -> Self {
        Session {
            client,
            state: SessionState::SignedOut,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.state, SessionState::SignedIn(_))
    }

    /// The signed-in user, or `NotSignedIn`.
    pub fn current_user(&self) -> AdminResult<&CurrentUser> {
        match &self.state {
            SessionState::SignedIn(user) => Ok(user),
            SessionState::SignedOut => Err(AdminError::NotSignedIn),
        }
    }

    /// Tries to resume a saved session. With a stored token, asks the
    /// backend who it belongs to; a rejected token is cleared and the
    /// session settles signed out.
    pub async fn resume(&mut self) -> AdminResult<bool> {
        if !self.client.tokens().is_present() {
            return Ok(false);
        }
        match self.client.auth().me().await {
            Ok(user) => {
                info!(username = %user.username, "Resumed saved session");
                self.state = SessionState::SignedIn(user);
                Ok(true)
            }
            Err(e) if e.is_unauthorized() => {
                warn!("Saved token rejected, clearing it");
                self.client.auth().logout();
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn sign_in(&mut self, username: &str, password: &str) -> AdminResult<CurrentUser> {
        let response = self.client.auth().login(username, password).await?;
        let user = response.user();
        self.state = SessionState::SignedIn(user.clone());
        Ok(user)
    }

    pub fn sign_out(&mut self) {
        self.client.auth().logout();
        self.state = SessionState::SignedOut;
    }

    /// Routes a page-level failure through the session. An expired or
    /// revoked token signs the session out; every other error passes
    /// through untouched for the page to display.
    pub fn note_failure(&mut self, error: &AdminError) {
        if error.is_unauthorized() && self.is_signed_in() {
            warn!("Token rejected by backend, dropping session");
            self.client.auth().logout();
            self.state = SessionState::SignedOut;
            info!("Signed out");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kirana_client::{ApiError, TokenStore};

    fn session() -> Session {
        let client = ApiClient::new("http://localhost:9", TokenStore::in_memory()).unwrap();
        Session::new(client)
    }

    #[test]
    fn test_starts_signed_out() {
        let session = session();
        assert!(!session.is_signed_in());
        assert!(matches!(
            session.current_user(),
            Err(AdminError::NotSignedIn)
        ));
    }

    #[test]
    fn test_unauthorized_failure_drops_session() {
        let mut session = session();
        session.state = SessionState::SignedIn(CurrentUser {
            username: "asha".into(),
            role: "admin".into(),
        });

        session.note_failure(&AdminError::Api(ApiError::Unauthorized {
            detail: "token expired".into(),
        }));
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_other_failures_leave_session_alone() {
        let mut session = session();
        session.state = SessionState::SignedIn(CurrentUser {
            username: "asha".into(),
            role: "admin".into(),
        });

        session.note_failure(&AdminError::Api(ApiError::Backend {
            status: 400,
            detail: "bad request".into(),
        }));
        assert!(session.is_signed_in());
    }
}
