use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Farmer record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Farmer {
    pub id: Uuid,
    pub name: String,
    pub email: String, // always stored lowercase
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 hash, not exposed in JSON
    pub role: String,
    #[serde(rename = "profilePicture")]
    pub profile_picture: Option<String>, // data URI or URL
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Partial profile update; `None` keeps the stored value.
/// Email is deliberately absent: it is immutable after registration.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub role: Option<String>,
    pub profile_picture: Option<String>,
}
