use crate::claims::{Claims, Subject};
use crate::internal::raw::RawPayload;
use crate::Role;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

//--------------------------------------------------------------------------------------------------
// Decode errors
//--------------------------------------------------------------------------------------------------

// Every variant means the same thing to callers: treat the bearer as absent.

#[derive(Debug, Error)]
pub enum MalformedTokenError {
    #[error("token does not have enough segments")]
    TooFewSegments,
    #[error("payload segment is not valid base64url: {0}")]
    PayloadEncoding(#[from] base64::DecodeError),
    #[error("payload is not a valid claims record: {0}")]
    PayloadParse(#[from] serde_json::Error),
    #[error("payload carries neither a userId nor a sub claim")]
    MissingSubject,
    #[error("unknown role {0:?} in payload")]
    UnknownRole(String),
}

//--------------------------------------------------------------------------------------------------
// Decoding function
//--------------------------------------------------------------------------------------------------

fn subject_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Decode the payload segment of a bearer token into a validated claim set.
///
/// The token must carry at least two `.`-delimited segments; only the second
/// is consumed. No signature verification happens here - the backend owns
/// token integrity. Callers must treat any error as "unauthenticated".
pub fn decode(token: &str) -> Result<Claims, MalformedTokenError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next()) {
        (Some(_), Some(payload)) => payload,
        _ => return Err(MalformedTokenError::TooFewSegments),
    };

    let decoded = URL_SAFE_NO_PAD.decode(payload)?;
    let raw: RawPayload = serde_json::from_slice(&decoded)?;

    // userId is checked before sub, matching what the backend issues
    let subject = raw
        .user_id
        .as_ref()
        .and_then(subject_value)
        .or_else(|| raw.sub.as_ref().and_then(subject_value))
        .map(Subject::new)
        .ok_or(MalformedTokenError::MissingSubject)?;

    let role = match raw.role {
        Some(value) => match Role::from_claim(&value) {
            Some(role) => Some(role),
            None => return Err(MalformedTokenError::UnknownRole(value)),
        },
        None => None,
    };

    debug!("decoded claims for subject {}", subject);

    Ok(Claims {
        subject,
        role,
        first_name: raw.first_name,
        last_name: raw.last_name,
        email: raw.email,
        expires_at: raw.exp,
    })
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
