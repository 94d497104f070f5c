use tracing::{debug, info, warn};

use crate::auth::{error::AuthError, password::Passwords, repo::UserStore, repo_types::User};

/// Create an account. The plaintext password never reaches the store.
pub async fn register(
    store: &dyn UserStore,
    passwords: &Passwords,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    // cheap reject before paying for a hash
    if store.exists(username).await? {
        warn!(%username, "username already registered");
        return Err(AuthError::DuplicateUsername);
    }

    let hash = hash_blocking(passwords, password).await?;
    let user = store.create(username, &hash).await?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Check credentials. Inactive accounts are rejected before the password is
/// looked at.
pub async fn authenticate(
    store: &dyn UserStore,
    passwords: &Passwords,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    let user = match store.find_by_username(username).await {
        Ok(u) => u,
        Err(AuthError::NotFound) => {
            warn!(%username, "login unknown username");
            return Err(AuthError::NotFound);
        }
        Err(e) => return Err(e),
    };

    if !user.is_active {
        warn!(user_id = user.id, "login on inactive account");
        return Err(AuthError::AccountInactive);
    }

    if !verify_blocking(passwords, password, &user.password_hash).await? {
        warn!(user_id = user.id, "login invalid password");
        return Err(AuthError::InvalidPassword);
    }

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(user)
}

async fn hash_blocking(passwords: &Passwords, password: &str) -> Result<String, AuthError> {
    let passwords = passwords.clone();
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || passwords.hash(&password))
        .await
        .map_err(|e| AuthError::Hashing(format!("hash task failed: {e}")))?
}

async fn verify_blocking(
    passwords: &Passwords,
    password: &str,
    hash: &str,
) -> Result<bool, AuthError> {
    let passwords = passwords.clone();
    let password = password.to_owned();
    let hash = hash.to_owned();
    let ok = tokio::task::spawn_blocking(move || passwords.verify(&password, &hash))
        .await
        .map_err(|e| AuthError::Hashing(format!("verify task failed: {e}")))?;
    debug!(matched = ok, "password verified");
    Ok(ok)
}
