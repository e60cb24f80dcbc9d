use crate::models::User;
use crate::vault::{PersistedSession, SessionVault, VaultError};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

//--------------------------------------------------------------------------------------------------
// Errors
//--------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Vault(#[from] VaultError),
}

//--------------------------------------------------------------------------------------------------
// Session store
//--------------------------------------------------------------------------------------------------

/// Single source of truth for "who is logged in right now".
///
/// The current identity sits behind a watch channel, so `observe` hands a
/// new subscriber the latest value immediately and every update after it,
/// including the terminal `None` on logout. All writes go through the vault
/// first; the in-memory view only changes once the durable state has.
pub struct SessionStore<V: SessionVault> {
    vault: V,
    token: Mutex<Option<String>>,
    current: watch::Sender<Option<User>>,
}

impl<V: SessionVault> SessionStore<V> {
    pub fn new(vault: V) -> Self {
        let (current, _) = watch::channel(None);
        SessionStore {
            vault,
            token: Mutex::new(None),
            current,
        }
    }

    fn token_slot(&self) -> MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, token: Option<String>, user: Option<User>) -> Result<(), SessionError> {
        self.vault.store(&PersistedSession {
            token,
            current_user: user,
        })?;
        Ok(())
    }

    /// Rehydrate the session from the vault at startup.
    ///
    /// Corrupt persisted state, an undecodable token, or an expired token
    /// all degrade the same way: both keys are cleared and the process
    /// starts logged out. Partial trust is never an outcome.
    pub fn restore(&self) -> Result<Option<User>, SessionError> {
        let persisted = match self.vault.load() {
            Ok(persisted) => persisted,
            Err(VaultError::Corrupt(err)) => {
                warn!("persisted session is corrupt, starting logged out: {}", err);
                self.clear()?;
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let Some(token) = persisted.token else {
            if persisted.current_user.is_some() {
                warn!("identity snapshot present without a token, starting logged out");
                self.clear()?;
            }
            return Ok(None);
        };

        match gymauth::decode(&token) {
            Ok(claims) if claims.is_expired() => {
                info!("persisted token has expired, starting logged out");
                self.clear()?;
                return Ok(None);
            }
            Err(err) => {
                warn!("persisted token is undecodable, starting logged out: {}", err);
                self.clear()?;
                return Ok(None);
            }
            Ok(_) => {}
        }

        *self.token_slot() = Some(token);
        if let Some(user) = persisted.current_user.clone() {
            debug!("restored session for {}", user.email);
            self.current.send_replace(Some(user));
        }

        Ok(persisted.current_user)
    }

    /// Store the raw bearer string issued at login.
    pub fn adopt_token(&self, token: String) -> Result<(), SessionError> {
        self.persist(Some(token.clone()), self.current())?;
        *self.token_slot() = Some(token);
        Ok(())
    }

    /// Replace the current identity, persist the snapshot, notify observers.
    pub fn set_identity(&self, user: User) -> Result<(), SessionError> {
        self.persist(self.raw_token(), Some(user.clone()))?;
        debug!("current identity set to {}", user.email);
        self.current.send_replace(Some(user));
        Ok(())
    }

    pub fn current(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    pub fn raw_token(&self) -> Option<String> {
        self.token_slot().clone()
    }

    /// Subscribe to identity changes. The receiver starts out holding the
    /// latest value.
    pub fn observe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }

    /// Log out: drop the token and the snapshot together. Idempotent.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.persist(None, None)?;
        *self.token_slot() = None;
        self.current.send_replace(None);
        info!("session cleared");
        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
