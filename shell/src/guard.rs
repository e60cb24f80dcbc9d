use crate::routes::{fallback_path, RouteTable};
use crate::session::SessionStore;
use crate::vault::SessionVault;
use gymauth::{evaluate, DenyReason, Evaluation};
use thiserror::Error;
use tracing::{debug, info, warn};

//--------------------------------------------------------------------------------------------------
// Navigation side effect
//--------------------------------------------------------------------------------------------------

/// Fire-and-forget redirect sink. The interactive driver implements this in
/// production; tests use a recording implementation.
pub trait Navigator {
    fn navigate(&mut self, path: &str);
}

//--------------------------------------------------------------------------------------------------
// Denials
//--------------------------------------------------------------------------------------------------

// Surfaced to the user only as a navigation change, never as a crash.

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("not logged in")]
    NoToken,
    #[error("session is no longer valid")]
    InvalidToken,
    #[error("the current role may not enter this destination")]
    WrongRole,
    #[error("unknown destination")]
    UnknownDestination,
}

impl From<DenyReason> for AccessDenied {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::NoToken => AccessDenied::NoToken,
            DenyReason::InvalidToken => AccessDenied::InvalidToken,
            DenyReason::WrongRole => AccessDenied::WrongRole,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Route guard
//--------------------------------------------------------------------------------------------------

/// Gates entry into a destination before it renders. Holds no session state
/// of its own: every call re-reads the token, so a logout elsewhere in the
/// app takes effect on the very next navigation attempt.
pub struct RouteGuard {
    table: RouteTable,
}

impl RouteGuard {
    pub fn new(table: RouteTable) -> Self {
        RouteGuard { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Gate one navigation attempt.
    ///
    /// On allow the navigator is left untouched - rendering the destination
    /// is the caller's job. On denial the session is cleared if the token
    /// was undecodable, and the navigator is redirected to the fallback.
    pub fn admit<V: SessionVault>(
        &self,
        path: &str,
        session: &SessionStore<V>,
        navigator: &mut dyn Navigator,
    ) -> Result<(), AccessDenied> {
        let Some(requirement) = self.table.requirement(path) else {
            warn!("navigation to unknown destination {}", path);
            return Err(AccessDenied::UnknownDestination);
        };

        let token = session.raw_token();
        match evaluate(token.as_deref(), requirement) {
            Evaluation::Allowed(_) => {
                debug!("navigation to {} allowed", path);
                Ok(())
            }
            Evaluation::Denied { reason, fallback } => {
                if reason == DenyReason::InvalidToken {
                    // an undecodable token is dropped, never retried
                    if let Err(err) = session.clear() {
                        warn!("failed to clear session after invalid token: {}", err);
                    }
                }

                let target = fallback_path(fallback);
                info!(
                    "navigation to {} denied ({:?}), redirecting to {}",
                    path, reason, target
                );
                navigator.navigate(target);
                Err(reason.into())
            }
        }
    }
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::routes::{ADMIN_HOME, CLIENT_HOME, HOME, LOGIN};
    use crate::vault::MemoryVault;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use gymauth::Role;

    // payload is {"role":"ADMIN","userId":1}
    const ADMIN_TOKEN: &str = "header.eyJyb2xlIjoiQURNSU4iLCJ1c2VySWQiOjF9.sig";

    fn client_token() -> String {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"role":"CLIENT","userId":2}"#);
        format!("header.{payload}.sig")
    }

    fn sample_user() -> User {
        User {
            id: Some(1),
            first_name: "Nadia".to_string(),
            last_name: "Benali".to_string(),
            email: "nadia@gym.test".to_string(),
            phone: 612345678,
            role: Role::Admin,
            photo: None,
            membership_type: None,
            membership_status: None,
            start_date: None,
            end_date: None,
            offer_id: None,
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        visited: Vec<String>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, path: &str) {
            self.visited.push(path.to_string());
        }
    }

    fn guard() -> RouteGuard {
        RouteGuard::new(RouteTable::product_routes())
    }

    #[test]
    fn public_destination_is_admitted_without_a_session() {
        let session = SessionStore::new(MemoryVault::default());
        let mut nav = RecordingNavigator::default();

        assert_eq!(guard().admit(HOME, &session, &mut nav), Ok(()));
        assert!(nav.visited.is_empty());
    }

    #[test]
    fn protected_destination_without_a_token_redirects_to_login() {
        let session = SessionStore::new(MemoryVault::default());
        let mut nav = RecordingNavigator::default();

        assert_eq!(
            guard().admit("/members", &session, &mut nav),
            Err(AccessDenied::NoToken)
        );
        assert_eq!(nav.visited, vec![LOGIN.to_string()]);
    }

    #[test]
    fn undecodable_token_clears_the_session_and_redirects_to_login() {
        let session = SessionStore::new(MemoryVault::default());
        session.adopt_token("onlyonepart".to_string()).unwrap();
        session.set_identity(sample_user()).unwrap();
        let mut nav = RecordingNavigator::default();

        assert_eq!(
            guard().admit("/members", &session, &mut nav),
            Err(AccessDenied::InvalidToken)
        );
        assert_eq!(nav.visited, vec![LOGIN.to_string()]);
        assert_eq!(session.raw_token(), None);
        assert_eq!(session.current(), None);
    }

    #[test]
    fn admin_is_admitted_to_the_admin_home() {
        let session = SessionStore::new(MemoryVault::default());
        session.adopt_token(ADMIN_TOKEN.to_string()).unwrap();
        let mut nav = RecordingNavigator::default();

        assert_eq!(guard().admit(ADMIN_HOME, &session, &mut nav), Ok(()));
        assert!(nav.visited.is_empty());
    }

    #[test]
    fn admin_denied_at_a_client_destination_lands_on_the_admin_home() {
        let session = SessionStore::new(MemoryVault::default());
        session.adopt_token(ADMIN_TOKEN.to_string()).unwrap();
        let mut nav = RecordingNavigator::default();

        assert_eq!(
            guard().admit(CLIENT_HOME, &session, &mut nav),
            Err(AccessDenied::WrongRole)
        );
        assert_eq!(nav.visited, vec![ADMIN_HOME.to_string()]);
        // a wrong role is not a broken session
        assert_eq!(session.raw_token(), Some(ADMIN_TOKEN.to_string()));
    }

    #[test]
    fn client_denied_at_an_admin_destination_lands_on_the_client_home() {
        let session = SessionStore::new(MemoryVault::default());
        session.adopt_token(client_token()).unwrap();
        let mut nav = RecordingNavigator::default();

        assert_eq!(
            guard().admit(ADMIN_HOME, &session, &mut nav),
            Err(AccessDenied::WrongRole)
        );
        assert_eq!(nav.visited, vec![CLIENT_HOME.to_string()]);
    }

    #[test]
    fn unknown_destination_is_denied_without_a_redirect() {
        let session = SessionStore::new(MemoryVault::default());
        session.adopt_token(ADMIN_TOKEN.to_string()).unwrap();
        let mut nav = RecordingNavigator::default();

        assert_eq!(
            guard().admit("/nope", &session, &mut nav),
            Err(AccessDenied::UnknownDestination)
        );
        assert!(nav.visited.is_empty());
    }

    #[test]
    fn the_guard_re_evaluates_every_attempt() {
        let session = SessionStore::new(MemoryVault::default());
        session.adopt_token(ADMIN_TOKEN.to_string()).unwrap();
        let mut nav = RecordingNavigator::default();
        let guard = guard();

        assert_eq!(guard.admit("/members", &session, &mut nav), Ok(()));

        // a concurrent logout elsewhere in the app
        session.clear().unwrap();

        assert_eq!(
            guard.admit("/members", &session, &mut nav),
            Err(AccessDenied::NoToken)
        );
        assert_eq!(nav.visited, vec![LOGIN.to_string()]);
    }
}

//--------------------------------------------------------------------------------------------------
