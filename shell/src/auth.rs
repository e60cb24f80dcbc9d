use crate::api::{ApiClient, ApiError};
use crate::models::User;
use crate::routes::{ADMIN_HOME, CLIENT_HOME};
use crate::session::{SessionError, SessionStore};
use crate::vault::SessionVault;
use gymauth::{Claims, MalformedTokenError, Role};
use thiserror::Error;
use tracing::{info, warn};

//--------------------------------------------------------------------------------------------------
// Errors
//--------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum AuthFlowError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("backend issued an unusable token: {0}")]
    BadToken(#[from] MalformedTokenError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("no user is logged in")]
    NotLoggedIn,
}

//--------------------------------------------------------------------------------------------------
// Login / logout orchestration
//--------------------------------------------------------------------------------------------------

/// Where a freshly authenticated identity lands.
fn landing_for(claims: &Claims) -> &'static str {
    match claims.role() {
        Some(Role::Admin) => ADMIN_HOME,
        _ => CLIENT_HOME,
    }
}

pub struct AuthFlow<'a, V: SessionVault> {
    api: &'a ApiClient,
    session: &'a SessionStore<V>,
}

impl<'a, V: SessionVault> AuthFlow<'a, V> {
    pub fn new(api: &'a ApiClient, session: &'a SessionStore<V>) -> Self {
        AuthFlow { api, session }
    }

    /// Exchange credentials for a token, adopt it, and report the
    /// role-dependent landing destination.
    ///
    /// A token the backend returns but the codec rejects counts as a failed
    /// login. A profile fetch failure does not: the session keeps the token
    /// and the identity snapshot fills in on the next refresh.
    pub async fn login(&self, email: &str, password: &str) -> Result<&'static str, AuthFlowError> {
        let token = self.api.login(email, password).await?;
        let claims = gymauth::decode(&token)?;
        self.session.adopt_token(token)?;

        match self
            .api
            .user_by_email(self.session.raw_token().as_deref(), email)
            .await
        {
            Ok(user) => self.session.set_identity(user)?,
            Err(err) => warn!("could not load the profile after login: {}", err),
        }

        info!("subject {} logged in", claims.subject());
        Ok(landing_for(&claims))
    }

    pub fn logout(&self) -> Result<(), AuthFlowError> {
        self.session.clear()?;
        Ok(())
    }

    /// Re-fetch the current user from the backend and adopt the result.
    pub async fn refresh(&self) -> Result<User, AuthFlowError> {
        let current = self.session.current().ok_or(AuthFlowError::NotLoggedIn)?;
        let user = self
            .api
            .user_by_email(self.session.raw_token().as_deref(), &current.email)
            .await?;
        self.session.set_identity(user.clone())?;
        Ok(user)
    }
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    fn claims_for(payload: &str) -> Claims {
        let token = format!("header.{}.sig", URL_SAFE_NO_PAD.encode(payload));
        gymauth::decode(&token).unwrap()
    }

    #[test]
    fn admins_land_on_the_admin_home() {
        let claims = claims_for(r#"{"role":"ADMIN","userId":1}"#);
        assert_eq!(landing_for(&claims), ADMIN_HOME);
    }

    #[test]
    fn everyone_else_lands_on_the_client_home() {
        let client = claims_for(r#"{"role":"CLIENT","userId":2}"#);
        assert_eq!(landing_for(&client), CLIENT_HOME);

        let roleless = claims_for(r#"{"userId":3}"#);
        assert_eq!(landing_for(&roleless), CLIENT_HOME);
    }
}

//--------------------------------------------------------------------------------------------------
