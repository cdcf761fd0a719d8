//! UserStore implementation for PgStorage.

use async_trait::async_trait;
use freshboard_core::User;
use sqlx::Row;

use super::PgStorage;
use crate::error::StorageError;
use crate::traits::UserStore;

const FIND_USER_SQL: &str =
    "SELECT username, password, company_name FROM users WHERE username = $1 LIMIT 1";

#[async_trait]
impl UserStore for PgStorage {
    async fn find_user(&self, username: &str) -> Result<Option<User>, StorageError> {
        let row = self
            .timed(async {
                sqlx::query(FIND_USER_SQL)
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .map_err(StorageError::from)
            })
            .await?;

        row.map(|r| -> Result<User, StorageError> {
            Ok(User {
                username: r.try_get("username")?,
                password_hash: r.try_get::<Option<String>, _>("password")?.unwrap_or_default(),
                company_name: r.try_get("company_name")?,
            })
        })
        .transpose()
    }
}
