use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
///
/// The same shape is deserialized from client input: `id` and the timestamps
/// default when absent and are overwritten by `prepare` anyway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    #[serde(default)]
    pub id: i64,                       // store-assigned, 0 until persisted
    pub username: String,
    pub email: String,
    #[serde(rename = "phone_number")]
    pub phone: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub specialisation: String,
    #[serde(default)]
    pub latitude: f32,
    #[serde(default)]
    pub longitude: f32,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(skip_serializing)]
    pub password: String,              // plaintext on input, Argon2 hash at rest
    #[serde(with = "time::serde::rfc3339", default = "OffsetDateTime::now_utc")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339", default = "OffsetDateTime::now_utc")]
    pub updated_at: OffsetDateTime,
}
