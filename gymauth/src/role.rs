use serde::{Deserialize, Serialize};
use std::fmt::Display;

//--------------------------------------------------------------------------------------------------
// The closed set of roles the backend issues
//--------------------------------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Client,
}

impl Role {
    // Claim values outside the closed set are rejected at decode time, not
    // mapped to a default
    pub(crate) fn from_claim(value: &str) -> Option<Self> {
        match value {
            "ADMIN" => Some(Role::Admin),
            "CLIENT" => Some(Role::Client),
            _ => None,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Client => write!(f, "CLIENT"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
