use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use crate::error::{UserError, UserResult};
use crate::users::password::{hash_password, verify_password};
use crate::users::repo_types::User;

/// Upper bound on the rows returned by [`User::find_all`].
pub const MAX_LISTED_USERS: i64 = 100;

const USER_COLUMNS: &str = "id, username, email, phone, image_url, specialisation, \
     latitude, longitude, address, region, country, password, created_at, updated_at";

impl User {
    /// Insert a new user, hashing the password first. The returned row carries
    /// the store-assigned id; both timestamps come from the database clock.
    #[instrument(skip(db, user), fields(username = %user.username))]
    pub async fn save(db: &PgPool, user: &User) -> UserResult<User> {
        let password_hash = hash_blocking(user.password.clone()).await?;

        let saved = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, phone, image_url, specialisation,
                               latitude, longitude, address, region, country,
                               password, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW(), NOW())
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.image_url)
        .bind(&user.specialisation)
        .bind(user.latitude)
        .bind(user.longitude)
        .bind(&user.address)
        .bind(&user.region)
        .bind(&user.country)
        .bind(&password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            warn!(error = %e, "insert user failed");
            UserError::from(e)
        })?;

        info!(user_id = saved.id, "user saved");
        Ok(saved)
    }

    /// Newest users first, at most [`MAX_LISTED_USERS`] of them.
    #[instrument(skip(db))]
    pub async fn find_all(db: &PgPool) -> UserResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#
        ))
        .bind(MAX_LISTED_USERS)
        .fetch_all(db)
        .await?;
        debug!(count = users.len(), "users listed");
        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, id: i64) -> UserResult<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or(UserError::NotFound)
    }

    #[instrument(skip(db))]
    pub async fn find_by_email(db: &PgPool, email: &str) -> UserResult<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email)
                .fetch_optional(db)
                .await?;
        Ok(user)
    }

    /// Overwrite every descriptive column of user `id` with `changes`.
    ///
    /// The password is re-hashed only when `changes.password` does not already
    /// match the stored hash. `updated_at` never moves backwards. No row lock
    /// is taken: concurrent updates are last-writer-wins.
    #[instrument(skip(db, changes))]
    pub async fn update(db: &PgPool, id: i64, changes: &User) -> UserResult<User> {
        let current = User::find_by_id(db, id).await?;
        let password_hash = resolve_password_hash(current.password, changes.password.clone()).await?;

        let updated = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
               SET username = $2, email = $3, phone = $4, image_url = $5,
                   specialisation = $6, latitude = $7, longitude = $8,
                   address = $9, region = $10, country = $11, password = $12,
                   updated_at = GREATEST(NOW(), updated_at)
             WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(&changes.image_url)
        .bind(&changes.specialisation)
        .bind(changes.latitude)
        .bind(changes.longitude)
        .bind(&changes.address)
        .bind(&changes.region)
        .bind(&changes.country)
        .bind(&password_hash)
        .fetch_optional(db)
        .await?
        .ok_or(UserError::NotFound)?;

        info!(user_id = id, "user updated");
        Ok(updated)
    }

    /// Number of deleted rows; 0 when no user had that id.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i64) -> UserResult<u64> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        info!(user_id = id, rows = res.rows_affected(), "user delete");
        Ok(res.rows_affected())
    }
}

/// Argon2 is slow on purpose; keep it off the async workers.
async fn hash_blocking(plain: String) -> UserResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .map_err(|e| UserError::Hash(e.to_string()))?
}

/// Hash to store for an update: the current one when the password did not
/// change, a fresh one otherwise.
async fn resolve_password_hash(stored_hash: String, supplied: String) -> UserResult<String> {
    tokio::task::spawn_blocking(move || {
        if password_unchanged(&stored_hash, &supplied) {
            Ok(stored_hash)
        } else {
            debug!("password changed, re-hashing");
            hash_password(&supplied)
        }
    })
    .await
    .map_err(|e| UserError::Hash(e.to_string()))?
}

/// Either the caller echoed the stored hash back or sent the same plaintext.
fn password_unchanged(stored_hash: &str, supplied: &str) -> bool {
    supplied == stored_hash || verify_password(stored_hash, supplied).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_when_plaintext_matches() {
        let hash = hash_password("secret123").unwrap();
        assert!(password_unchanged(&hash, "secret123"));
    }

    #[test]
    fn unchanged_when_hash_is_echoed() {
        let hash = hash_password("secret123").unwrap();
        assert!(password_unchanged(&hash, &hash));
    }

    #[test]
    fn changed_when_plaintext_differs() {
        let hash = hash_password("secret123").unwrap();
        assert!(!password_unchanged(&hash, "secret456"));
    }

    #[test]
    fn changed_when_stored_hash_is_unreadable() {
        assert!(!password_unchanged("legacy-garbage", "secret123"));
    }

    #[tokio::test]
    async fn resolve_keeps_stored_hash_for_same_password() {
        let hash = hash_blocking("secret123".into()).await.unwrap();
        let resolved = resolve_password_hash(hash.clone(), "secret123".into())
            .await
            .unwrap();
        assert_eq!(resolved, hash);
    }

    #[tokio::test]
    async fn resolve_rehashes_new_password() {
        let hash = hash_blocking("secret123".into()).await.unwrap();
        let resolved = resolve_password_hash(hash.clone(), "n3w-secret".into())
            .await
            .unwrap();
        assert_ne!(resolved, hash);
        verify_password(&resolved, "n3w-secret").unwrap();
    }
}
