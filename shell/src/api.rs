use crate::models::{CreateMember, CreateOffer, Offer, UpdateMember, UpdateOffer, User};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

//--------------------------------------------------------------------------------------------------
// Errors surfaced to the UI layer
//--------------------------------------------------------------------------------------------------

// The guard/session core never interprets these; they end at the driver as
// user-facing messages.

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("email or password incorrect")]
    InvalidCredentials,
    #[error("not found")]
    NotFound,
    #[error("backend rejected the request with status {0}")]
    Status(u16),
    #[error("server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("login response did not contain a token")]
    MissingToken,
}

//--------------------------------------------------------------------------------------------------
// Bodies owned by the backend contract
//--------------------------------------------------------------------------------------------------

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    pwd: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Client
//--------------------------------------------------------------------------------------------------

/// Typed client for the external REST backend. The backend owns its data
/// contracts and its own timeout/retry policy; this client only shapes
/// requests and maps failures.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        ApiClient {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn checked(response: Response) -> Result<Response, ApiError> {
        match response.status() {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status if !status.is_success() => Err(ApiError::Status(status.as_u16())),
            _ => Ok(response),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        debug!("GET {}", path);
        let response = Self::bearer(self.http.get(self.url(path)), token)
            .send()
            .await?;
        Ok(Self::checked(response)?.json().await?)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        body: &impl Serialize,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let response = Self::bearer(request, token).json(body).send().await?;
        Ok(Self::checked(response)?.json().await?)
    }

    //----------------------------------------------------------------------------------------------
    // Credential exchange
    //----------------------------------------------------------------------------------------------

    /// `POST /users/login` - exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        debug!("POST /users/login for {}", email);
        let response = self
            .http
            .post(self.url("/users/login"))
            .json(&LoginRequest {
                email,
                pwd: password,
            })
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                warn!("login rejected for {}", email);
                Err(ApiError::InvalidCredentials)
            }
            status if !status.is_success() => Err(ApiError::Status(status.as_u16())),
            _ => {
                let body: LoginResponse = response.json().await?;
                body.token.ok_or(ApiError::MissingToken)
            }
        }
    }

    //----------------------------------------------------------------------------------------------
    // Users
    //----------------------------------------------------------------------------------------------

    pub async fn user_by_id(&self, token: Option<&str>, id: i64) -> Result<User, ApiError> {
        self.get_json(&format!("/users/{id}"), token).await
    }

    pub async fn user_by_email(&self, token: Option<&str>, email: &str) -> Result<User, ApiError> {
        self.get_json(&format!("/users/email/{email}"), token).await
    }

    pub async fn users(&self, token: Option<&str>) -> Result<Vec<User>, ApiError> {
        self.get_json("/users/all", token).await
    }

    /// Self-service registration; always a CLIENT on the backend side.
    pub async fn signup(&self, request: &CreateMember) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/users/signup"))
            .json(request)
            .send()
            .await?;
        Self::checked(response)?;
        Ok(())
    }

    pub async fn create_member(
        &self,
        token: Option<&str>,
        request: &CreateMember,
    ) -> Result<(), ApiError> {
        let response = Self::bearer(self.http.post(self.url("/users/addUser")), token)
            .json(request)
            .send()
            .await?;
        Self::checked(response)?;
        Ok(())
    }

    pub async fn update_member(
        &self,
        token: Option<&str>,
        id: i64,
        request: &UpdateMember,
    ) -> Result<User, ApiError> {
        self.send_json(self.http.put(self.url(&format!("/users/{id}"))), request, token)
            .await
    }

    pub async fn delete_member(&self, token: Option<&str>, id: i64) -> Result<(), ApiError> {
        let response = Self::bearer(self.http.delete(self.url(&format!("/users/{id}"))), token)
            .send()
            .await?;
        Self::checked(response)?;
        Ok(())
    }

    //----------------------------------------------------------------------------------------------
    // Offers
    //----------------------------------------------------------------------------------------------

    pub async fn offers(&self, token: Option<&str>) -> Result<Vec<Offer>, ApiError> {
        self.get_json("/offers/all", token).await
    }

    pub async fn offer(&self, token: Option<&str>, id: i64) -> Result<Offer, ApiError> {
        self.get_json(&format!("/offers/{id}"), token).await
    }

    pub async fn create_offer(
        &self,
        token: Option<&str>,
        request: &CreateOffer,
    ) -> Result<Offer, ApiError> {
        self.send_json(self.http.post(self.url("/offers/add")), request, token)
            .await
    }

    pub async fn update_offer(
        &self,
        token: Option<&str>,
        id: i64,
        request: &UpdateOffer,
    ) -> Result<Offer, ApiError> {
        self.send_json(self.http.put(self.url(&format!("/offers/{id}"))), request, token)
            .await
    }

    pub async fn delete_offer(&self, token: Option<&str>, id: i64) -> Result<(), ApiError> {
        let response = Self::bearer(self.http.delete(self.url(&format!("/offers/{id}"))), token)
            .send()
            .await?;
        Self::checked(response)?;
        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trailing_slashes_are_trimmed_from_the_base_url() {
        let client = ApiClient::new("http://localhost:8091/api/");
        assert_eq!(client.url("/users/login"), "http://localhost:8091/api/users/login");
    }

    #[test]
    fn login_request_matches_the_backend_contract() {
        let body = LoginRequest {
            email: "nadia@gym.test",
            pwd: "s3cret!",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "email": "nadia@gym.test", "pwd": "s3cret!" })
        );
    }

    #[test]
    fn login_response_token_is_optional() {
        let with: LoginResponse = serde_json::from_value(json!({ "token": "abc" })).unwrap();
        assert_eq!(with.token.as_deref(), Some("abc"));

        let without: LoginResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(without.token, None);
    }
}

//--------------------------------------------------------------------------------------------------
