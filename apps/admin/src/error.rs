//! Application-level error type.
//!
//! Pages return [`AdminError`] so callers see one error surface whether a
//! failure came from local validation, the HTTP layer, or the session.

use kirana_client::ApiError;
use kirana_core::error::CoreError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Not signed in")]
    NotSignedIn,

    /// The row a mutation targets is missing from the page's fetched list,
    /// so no request was made. Usually a stale id after a refresh.
    #[error("{entity} {id} is not in the fetched list")]
    NotFetched { entity: &'static str, id: i64 },
}

impl AdminError {
    /// A message fit for the status line.
    pub fn user_message(&self) -> String {
        match self {
            AdminError::Api(e) => e.user_message(),
            AdminError::Core(e) => e.to_string(),
            AdminError::Config(e) => e.to_string(),
            AdminError::NotSignedIn => "Please sign in first".to_string(),
            AdminError::NotFetched { .. } => {
                "That row is no longer listed; refresh and try again".to_string()
            }
        }
    }

    /// True if the backend rejected our token; the session layer reacts to
    /// this by dropping to the login screen.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AdminError::Api(e) if e.is_unauthorized())
    }
}

pub type AdminResult<T> = Result<T, AdminError>;
