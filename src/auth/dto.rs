use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::{error::AuthError, repo_types::User};

pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 50;
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Request body for user registration.
#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        let username_len = self.username.chars().count();
        if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&username_len) {
            return Err(AuthError::MalformedRequest(format!(
                "username must be between {USERNAME_MIN_CHARS} and {USERNAME_MAX_CHARS} characters"
            )));
        }
        if self.password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(AuthError::MalformedRequest(format!(
                "password must be at least {PASSWORD_MIN_CHARS} characters"
            )));
        }
        Ok(())
    }
}

/// Request body for login.
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.username.is_empty() {
            return Err(AuthError::MalformedRequest("username is required".into()));
        }
        if self.password.is_empty() {
            return Err(AuthError::MalformedRequest("password is required".into()));
        }
        Ok(())
    }
}

/// Envelope shared by every auth response.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUser>,
}

impl AuthResponse {
    pub fn success(message: impl Into<String>, user: User) -> Self {
        Self {
            success: true,
            message: message.into(),
            user: Some(user.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            user: None,
        }
    }
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub is_active: bool,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            created_at: u.created_at,
            updated_at: u.updated_at,
            is_active: u.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn register_length_rules() {
        assert!(register("alice", "secret1").validate().is_ok());
        assert!(register("abc", "123456").validate().is_ok());
        assert!(register(&"a".repeat(50), "123456").validate().is_ok());

        assert!(register("ab", "secret1").validate().is_err());
        assert!(register(&"a".repeat(51), "secret1").validate().is_err());
        assert!(register("alice", "12345").validate().is_err());
        assert!(register("", "").validate().is_err());
    }

    #[test]
    fn register_counts_characters_not_bytes() {
        // three characters, nine bytes
        assert!(register("日本語", "secret1").validate().is_ok());
        assert!(register("alice", "ñññññ").validate().is_err());
        assert!(register("alice", "ññññññ").validate().is_ok());
    }

    #[test]
    fn login_requires_both_fields() {
        let ok = LoginRequest {
            username: "alice".into(),
            password: "x".into(),
        };
        assert!(ok.validate().is_ok());

        let no_user = LoginRequest {
            username: String::new(),
            password: "x".into(),
        };
        assert!(matches!(no_user.validate(), Err(AuthError::MalformedRequest(_))));

        let no_pass = LoginRequest {
            username: "alice".into(),
            password: String::new(),
        };
        assert!(matches!(no_pass.validate(), Err(AuthError::MalformedRequest(_))));
    }

    #[test]
    fn success_envelope_never_carries_hash() {
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: 7,
            username: "alice".into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            created_at: now,
            updated_at: now,
            is_active: true,
        };

        let json = serde_json::to_value(AuthResponse::success("ok", user)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["id"], 7);
        assert_eq!(json["user"]["username"], "alice");
        assert!(json["user"].get("password_hash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn failure_envelope_omits_user() {
        let json = serde_json::to_value(AuthResponse::failure("nope")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "nope");
        assert!(json.get("user").is_none());
    }
}
