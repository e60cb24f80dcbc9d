use gymauth::Role;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

//--------------------------------------------------------------------------------------------------
// Membership status as issued by the backend
//--------------------------------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum MembershipStatus {
    Active,
    Inactive,
    Pending,
}

//--------------------------------------------------------------------------------------------------
// Users
//--------------------------------------------------------------------------------------------------

// The identity snapshot persisted under the currentUser key is exactly this
// record. Passwords never appear here; credential fields live only in the
// create/signup requests.

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: i64,
    pub role: Role,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub membership_type: Option<String>,
    #[serde(default)]
    pub membership_status: Option<MembershipStatus>,
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
    #[serde(default)]
    pub offer_id: Option<i64>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMember {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(rename = "pwd")]
    pub password: String,
    pub phone: i64,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<i64>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_status: Option<MembershipStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<i64>,
}

//--------------------------------------------------------------------------------------------------
// Offers
//--------------------------------------------------------------------------------------------------

// The backend's offer contract uses French field names on the wire; the
// serde renames keep that contract intact.

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Offer {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "titre")]
    pub title: String,
    pub description: String,
    #[serde(rename = "dureeMois")]
    pub duration_months: u32,
    #[serde(rename = "prix")]
    pub price: f64,
    #[serde(default, rename = "createdAt", with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, rename = "updatedAt", with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CreateOffer {
    #[serde(rename = "titre")]
    pub title: String,
    pub description: String,
    #[serde(rename = "dureeMois")]
    pub duration_months: u32,
    #[serde(rename = "prix")]
    pub price: f64,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct UpdateOffer {
    #[serde(rename = "titre", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "dureeMois", skip_serializing_if = "Option::is_none")]
    pub duration_months: Option<u32>,
    #[serde(rename = "prix", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
