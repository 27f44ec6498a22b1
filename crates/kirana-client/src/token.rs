//! # Token Store
//!
//! Holds the bearer token; the ONLY durable client-side state in the whole
//! application. In-memory for the life of the process, mirrored to a file so
//! a restarted session can resume without logging in again.
//!
//! ## Storage Location
//! `ProjectDirs`-resolved data directory:
//! - Linux:   `~/.local/share/kirana-pos/token`
//! - macOS:   `~/Library/Application Support/com.kirana.pos/token`
//! - Windows: `%APPDATA%/kirana/pos/data/token`

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use directories::ProjectDirs;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};

/// Shared bearer-token holder.
///
/// Cloning is cheap; all clones observe the same token. A store created
/// with [`TokenStore::in_memory`] never touches disk (tests, one-shot
/// invocations).
#[derive(Debug, Clone)]
pub struct TokenStore {
    token: Arc<RwLock<Option<String>>>,
    path: Option<PathBuf>,
}

impl TokenStore {
    /// Opens the on-disk store, loading any previously saved token.
    pub fn open_default() -> ApiResult<Self> {
        let dirs = ProjectDirs::from("com", "kirana", "pos")
            .ok_or_else(|| ApiError::TokenStorage("no home directory".to_string()))?;
        let path = dirs.data_dir().join("token");

        let token = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let trimmed = contents.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    debug!(path = %path.display(), "Loaded saved session token");
                    Some(trimmed.to_string())
                }
            }
            Err(_) => None,
        };

        Ok(TokenStore {
            token: Arc::new(RwLock::new(token)),
            path: Some(path),
        })
    }

    /// A store that never persists. Used by tests and short-lived runs.
    pub fn in_memory() -> Self {
        TokenStore {
            token: Arc::new(RwLock::new(None)),
            path: None,
        }
    }

    /// Current token, if any.
    pub fn current(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    pub fn is_present(&self) -> bool {
        self.current().is_some()
    }

    /// Stores a fresh token and mirrors it to disk.
    pub fn store(&self, token: &str) -> ApiResult<()> {
        *self.token.write().expect("token lock poisoned") = Some(token.to_string());

        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ApiError::TokenStorage(e.to_string()))?;
            }
            std::fs::write(path, token).map_err(|e| ApiError::TokenStorage(e.to_string()))?;
        }
        Ok(())
    }

    /// Clears the token in memory and on disk (logout, rejected token).
    pub fn clear(&self) {
        *self.token.write().expect("token lock poisoned") = None;

        if let Some(path) = &self.path {
            if let Err(e) = std::fs::remove_file(path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %e, "Failed to delete token file");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store_cycle() {
        let store = TokenStore::in_memory();
        assert!(!store.is_present());

        store.store("tok-123").unwrap();
        assert_eq!(store.current().as_deref(), Some("tok-123"));

        store.clear();
        assert!(!store.is_present());
    }

    #[test]
    fn test_clones_share_state() {
        let store = TokenStore::in_memory();
        let clone = store.clone();

        store.store("tok-456").unwrap();
        assert_eq!(clone.current().as_deref(), Some("tok-456"));

        clone.clear();
        assert!(!store.is_present());
    }
}
