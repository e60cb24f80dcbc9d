use crate::codec;
use crate::{Claims, Role};
use tracing::{debug, warn};

//--------------------------------------------------------------------------------------------------
// Route access requirement
//--------------------------------------------------------------------------------------------------

/// Static metadata attached to a navigable destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessRequirement {
    /// Anyone may enter, logged in or not.
    Public,
    /// Any authenticated identity may enter.
    Authenticated,
    /// Only an authenticated identity with this exact role may enter.
    Role(Role),
}

//--------------------------------------------------------------------------------------------------
// Decision outcomes
//--------------------------------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DenyReason {
    NoToken,
    InvalidToken,
    WrongRole,
}

/// Where a denied navigation should land. Abstract on purpose: mapping to
/// concrete paths belongs to whoever owns the route table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fallback {
    Login,
    AdminHome,
    ClientHome,
}

#[derive(Debug)]
pub enum Evaluation {
    Allowed(Option<Claims>),
    Denied { reason: DenyReason, fallback: Fallback },
}

impl Evaluation {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Evaluation::Allowed(_))
    }

    /// An undecodable token must not be partially trusted: the caller owns
    /// the session and is told to drop it.
    pub fn clears_session(&self) -> bool {
        matches!(
            self,
            Evaluation::Denied {
                reason: DenyReason::InvalidToken,
                ..
            }
        )
    }
}

//--------------------------------------------------------------------------------------------------
// Decision function
//--------------------------------------------------------------------------------------------------

/// Decide whether one navigation attempt may enter a destination with the
/// given requirement. Pure and terminal in one step: redirecting and
/// clearing the session are signalled through the returned value and
/// performed by the caller.
pub fn evaluate(token: Option<&str>, requirement: AccessRequirement) -> Evaluation {
    if requirement == AccessRequirement::Public {
        return Evaluation::Allowed(None);
    }

    let Some(token) = token else {
        warn!("navigation into a protected destination without a token");
        return Evaluation::Denied {
            reason: DenyReason::NoToken,
            fallback: Fallback::Login,
        };
    };

    let claims = match codec::decode(token) {
        Ok(claims) => claims,
        Err(err) => {
            warn!("navigation with an undecodable token: {}", err);
            return Evaluation::Denied {
                reason: DenyReason::InvalidToken,
                fallback: Fallback::Login,
            };
        }
    };

    let AccessRequirement::Role(required) = requirement else {
        debug!("subject {} allowed (authenticated)", claims.subject());
        return Evaluation::Allowed(Some(claims));
    };

    if claims.role() == Some(required) {
        debug!("subject {} allowed with role {}", claims.subject(), required);
        Evaluation::Allowed(Some(claims))
    } else {
        // A missing role claim never matches a role requirement; the
        // fallback is role-dependent so denial cannot loop back into the
        // destination that denied it
        let fallback = match claims.role() {
            Some(Role::Admin) => Fallback::AdminHome,
            _ => Fallback::ClientHome,
        };
        warn!(
            "subject {} denied: destination requires role {}",
            claims.subject(),
            required
        );
        Evaluation::Denied {
            reason: DenyReason::WrongRole,
            fallback,
        }
    }
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    // payload is {"role":"ADMIN","userId":1}
    const ADMIN_TOKEN: &str = "header.eyJyb2xlIjoiQURNSU4iLCJ1c2VySWQiOjF9.sig";

    fn token_with(payload: &str) -> String {
        format!("header.{}.sig", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn public_destination_ignores_the_token() {
        assert!(evaluate(None, AccessRequirement::Public).is_allowed());
        assert!(evaluate(Some("garbage"), AccessRequirement::Public).is_allowed());
    }

    #[test]
    fn absent_token_is_denied_to_login() {
        match evaluate(None, AccessRequirement::Authenticated) {
            Evaluation::Denied { reason, fallback } => {
                assert_eq!(reason, DenyReason::NoToken);
                assert_eq!(fallback, Fallback::Login);
            }
            other => panic!("expected denial, got {other:?}"),
        }
    }

    #[test]
    fn undecodable_token_is_denied_and_clears_the_session() {
        let evaluation = evaluate(Some("onlyonepart"), AccessRequirement::Authenticated);
        assert!(evaluation.clears_session());
        match evaluation {
            Evaluation::Denied { reason, fallback } => {
                assert_eq!(reason, DenyReason::InvalidToken);
                assert_eq!(fallback, Fallback::Login);
            }
            other => panic!("expected denial, got {other:?}"),
        }
    }

    #[test]
    fn authenticated_destination_admits_any_decoded_identity() {
        let evaluation = evaluate(Some(ADMIN_TOKEN), AccessRequirement::Authenticated);
        match evaluation {
            Evaluation::Allowed(Some(claims)) => assert_eq!(claims.role(), Some(Role::Admin)),
            other => panic!("expected allowed, got {other:?}"),
        }
    }

    #[test]
    fn matching_role_is_allowed() {
        assert!(evaluate(Some(ADMIN_TOKEN), AccessRequirement::Role(Role::Admin)).is_allowed());
    }

    #[test]
    fn admin_denied_at_client_destination_falls_back_to_admin_home() {
        match evaluate(Some(ADMIN_TOKEN), AccessRequirement::Role(Role::Client)) {
            Evaluation::Denied { reason, fallback } => {
                assert_eq!(reason, DenyReason::WrongRole);
                assert_eq!(fallback, Fallback::AdminHome);
            }
            other => panic!("expected denial, got {other:?}"),
        }
    }

    #[test]
    fn client_denied_at_admin_destination_falls_back_to_client_home() {
        let token = token_with(r#"{"role":"CLIENT","userId":2}"#);
        match evaluate(Some(&token), AccessRequirement::Role(Role::Admin)) {
            Evaluation::Denied { reason, fallback } => {
                assert_eq!(reason, DenyReason::WrongRole);
                assert_eq!(fallback, Fallback::ClientHome);
            }
            other => panic!("expected denial, got {other:?}"),
        }
    }

    #[test]
    fn missing_role_claim_never_matches_a_role_requirement() {
        let token = token_with(r#"{"userId":9}"#);

        // still fine for authenticated-only destinations
        assert!(evaluate(Some(&token), AccessRequirement::Authenticated).is_allowed());

        match evaluate(Some(&token), AccessRequirement::Role(Role::Admin)) {
            Evaluation::Denied { reason, fallback } => {
                assert_eq!(reason, DenyReason::WrongRole);
                assert_eq!(fallback, Fallback::ClientHome);
            }
            other => panic!("expected denial, got {other:?}"),
        }
    }

    #[test]
    fn wrong_role_denial_keeps_the_session() {
        let evaluation = evaluate(Some(ADMIN_TOKEN), AccessRequirement::Role(Role::Client));
        assert!(!evaluation.clears_session());
    }
}

//--------------------------------------------------------------------------------------------------
