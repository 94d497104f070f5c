use std::fmt;

use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
///
/// Deliberately not `Serialize`: responses go through `PublicUser`, so the
/// hash has no path out of the process.
#[derive(Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String, // Argon2 PHC string
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub is_active: bool,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("is_active", &self.is_active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_hash() {
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: 1,
            username: "alice".into(),
            password_hash: "$argon2id$secret-material".into(),
            created_at: now,
            updated_at: now,
            is_active: true,
        };
        let out = format!("{user:?}");
        assert!(out.contains("alice"));
        assert!(!out.contains("secret-material"));
    }
}
