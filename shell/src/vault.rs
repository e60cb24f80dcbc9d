use crate::models::User;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::debug;

//--------------------------------------------------------------------------------------------------
// Persisted state
//--------------------------------------------------------------------------------------------------

/// The entire durable contract: a token key and a currentUser key. Both
/// absent means logged out. The two keys are always replaced together so a
/// reader can never observe one updated without the other.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PersistedSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(
        default,
        rename = "currentUser",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_user: Option<User>,
}

impl PersistedSession {
    pub fn is_logged_out(&self) -> bool {
        self.token.is_none() && self.current_user.is_none()
    }
}

//--------------------------------------------------------------------------------------------------
// Errors
//--------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum VaultError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("persisted session is not parseable: {0}")]
    Corrupt(#[from] serde_json::Error),
}

//--------------------------------------------------------------------------------------------------
// Vault trait
//--------------------------------------------------------------------------------------------------

pub trait SessionVault {
    fn load(&self) -> Result<PersistedSession, VaultError>;
    fn store(&self, state: &PersistedSession) -> Result<(), VaultError>;
}

//--------------------------------------------------------------------------------------------------
// File-backed vault
//--------------------------------------------------------------------------------------------------

pub struct FileVault {
    path: PathBuf,
}

impl FileVault {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileVault { path: path.into() }
    }
}

impl SessionVault for FileVault {
    fn load(&self) -> Result<PersistedSession, VaultError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(PersistedSession::default())
            }
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn store(&self, state: &PersistedSession) -> Result<(), VaultError> {
        // Whole-state replace through a rename keeps the token and snapshot
        // keys in step even if the process dies mid-write
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(state)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!("persisted session state to {}", self.path.display());
        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// In-memory vault
//--------------------------------------------------------------------------------------------------

// For tests and ephemeral runs: same contract, no disk.

#[derive(Default)]
pub struct MemoryVault {
    state: Mutex<PersistedSession>,
}

impl SessionVault for MemoryVault {
    fn load(&self) -> Result<PersistedSession, VaultError> {
        Ok(self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn store(&self, state: &PersistedSession) -> Result<(), VaultError> {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state.clone();
        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
