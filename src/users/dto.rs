use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::User;

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub photo: Option<String>,
    pub role: String,
    pub verified: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            photo: u.photo,
            role: u.role,
            verified: u.verified,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn response_never_carries_secrets() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".into(),
            photo: None,
            verified: false,
            verification_code: Some("0123abcd".into()),
            role: "user".into(),
            created_at: datetime!(2024-05-01 10:00 UTC),
            updated_at: datetime!(2024-05-01 10:00 UTC),
        };

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["role"], "user");
        assert_eq!(json["created_at"], "2024-05-01T10:00:00Z");
        assert!(json.get("password").is_none());
        assert!(json.get("verification_code").is_none());
    }
}
