use serde::{Deserialize, Serialize};

use crate::users::repo_types::User;

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User as returned to the client: no password, plus the session token
/// issued by the caller. Built per response, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(rename = "phone_number")]
    pub phone: String,
    pub image_url: Option<String>,
    pub specialisation: String,
    pub latitude: f32,
    pub longitude: f32,
    pub address: String,
    pub region: String,
    pub country: String,
    pub token: String,
}

impl ResponseUser {
    pub fn from_user(user: User, token: impl Into<String>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            phone: user.phone,
            image_url: user.image_url,
            specialisation: user.specialisation,
            latitude: user.latitude,
            longitude: user.longitude,
            address: user.address,
            region: user.region,
            country: user.country,
            token: token.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample() -> User {
        User {
            id: 7,
            username: "vicki".into(),
            email: "vicki@example.com".into(),
            phone: "+254700000000".into(),
            image_url: None,
            specialisation: "plumbing".into(),
            latitude: -1.28,
            longitude: 36.82,
            address: "Moi Avenue".into(),
            region: "Nairobi".into(),
            country: "Kenya".into(),
            password: "$argon2id$v=19$fake".into(),
            created_at: datetime!(2024-01-01 0:00 UTC),
            updated_at: datetime!(2024-01-01 0:00 UTC),
        }
    }

    #[test]
    fn response_user_drops_password_and_carries_token() {
        let response = ResponseUser::from_user(sample(), "tok-123");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["phone_number"], "+254700000000");
        assert_eq!(json["token"], "tok-123");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn user_serialization_hides_password_hash() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("vicki@example.com"));
        assert!(!json.contains("argon2"));
        assert!(json.contains("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn user_input_defaults_identity_and_location() {
        let user: User = serde_json::from_str(
            r#"{
                "username": "tom",
                "email": "tom@example.com",
                "phone_number": "0700",
                "specialisation": "electrician",
                "password": "secret123"
            }"#,
        )
        .unwrap();
        assert_eq!(user.id, 0);
        assert_eq!(user.latitude, 0.0);
        assert_eq!(user.image_url, None);
        assert_eq!(user.password, "secret123");
    }
}
