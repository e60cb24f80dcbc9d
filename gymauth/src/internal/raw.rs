use crate::internal::unixtime::UnixTimestamp;
use serde::Deserialize;
use serde_json::Value;

//--------------------------------------------------------------------------------------------------
// Raw payload record
//--------------------------------------------------------------------------------------------------

// The untrusted JSON shape inside the token's payload segment. Every field
// is optional here; the codec decides which absences are fatal. Unknown
// fields are ignored.

#[derive(Deserialize)]
pub struct RawPayload {
    #[serde(default, rename = "userId")]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub sub: Option<Value>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(default, rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub exp: Option<UnixTimestamp>,
}

//--------------------------------------------------------------------------------------------------
