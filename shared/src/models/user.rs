//! User account models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::{parse_body, FieldError, FieldKind, FieldSpec};

/// A registered user. Farmers and buyers share one shape; a farmer is just
/// a user with the farm-related fields filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub farm_name: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The client-facing view of a user, with the password dropped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub farm_name: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            phone_number: user.phone_number,
            location: user.location,
            farm_name: user.farm_name,
            profile_image: user.profile_image,
            created_at: user.created_at,
        }
    }
}

/// Insert shape for registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub farm_name: Option<String>,
    pub profile_image: Option<String>,
}

impl NewUser {
    pub const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::required("username", FieldKind::Text),
        FieldSpec::required("email", FieldKind::Text),
        FieldSpec::required("password", FieldKind::Text),
        FieldSpec::required("fullName", FieldKind::Text),
        FieldSpec::optional("phoneNumber", FieldKind::Text),
        FieldSpec::optional("location", FieldKind::Text),
        FieldSpec::optional("farmName", FieldKind::Text),
        FieldSpec::optional("profileImage", FieldKind::Text),
    ];

    pub fn from_value(body: &Value) -> Result<Self, Vec<FieldError>> {
        parse_body(body, Self::SCHEMA)
    }
}
