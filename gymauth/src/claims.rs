use crate::internal::unixtime::UnixTimestamp;
use crate::Role;
use std::fmt::Display;

//--------------------------------------------------------------------------------------------------
// Subject identifier
//--------------------------------------------------------------------------------------------------

// Normalized from either the userId or the sub claim; numeric subjects are
// carried as their decimal rendering

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subject(String);

impl Subject {
    pub(crate) fn new(value: String) -> Self {
        Subject(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------------------------------------------------------------------
// Validated claim set
//--------------------------------------------------------------------------------------------------

/// The claims carried in a token's payload segment, validated for shape.
/// Shape only: the signature is never checked client-side, so these claims
/// steer navigation and display but never establish trust.
#[derive(Clone, Debug)]
pub struct Claims {
    pub(crate) subject: Subject,
    pub(crate) role: Option<Role>,
    pub(crate) first_name: Option<String>,
    pub(crate) last_name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) expires_at: Option<UnixTimestamp>,
}

impl Claims {
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Tokens without an exp claim never count as expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(UnixTimestamp::is_past)
    }
}

//--------------------------------------------------------------------------------------------------
