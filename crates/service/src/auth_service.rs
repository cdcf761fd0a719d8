use std::sync::Arc;

use freshboard_core::{DashboardSession, TableResolver};
use freshboard_storage::UserStore;

use crate::error::{AuthFailure, ServiceError};

/// Checks credentials against the `users` table and opens dashboard sessions.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    resolver: TableResolver,
}

impl AuthService {
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>, resolver: TableResolver) -> Self {
        Self { users, resolver }
    }

    /// Verify `username`/`password` and build a fresh session for the user's company.
    ///
    /// Stored values that are not bcrypt hashes are refused outright. A company
    /// that maps to no table still gets a session; its views report the reason.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<DashboardSession, ServiceError> {
        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::InvalidInput("enter username and password".to_owned()));
        }

        let Some(user) = self.users.find_user(username).await? else {
            tracing::warn!(username, "login rejected: user not found");
            return Err(AuthFailure::UserNotFound.into());
        };

        let hash = user.password_hash.clone();
        let candidate = password.to_owned();
        let verified =
            tokio::task::spawn_blocking(move || bcrypt::verify(candidate, &hash)).await?;
        match verified {
            Ok(true) => {},
            Ok(false) => {
                tracing::warn!(username, "login rejected: wrong password");
                return Err(AuthFailure::WrongPassword.into());
            },
            Err(e) => {
                tracing::warn!(
                    username,
                    error = %e,
                    "login rejected: stored credential is not a bcrypt hash"
                );
                return Err(AuthFailure::UnusableCredential.into());
            },
        }

        match self.resolver.resolve(&user.company_name) {
            Ok(table) => {
                tracing::info!(
                    username,
                    company = %user.company_name,
                    table = %table,
                    "login succeeded"
                );
                Ok(DashboardSession::new(user.username, user.company_name, table))
            },
            Err(e) => {
                tracing::warn!(
                    username,
                    company = %user.company_name,
                    error = %e,
                    "login succeeded without a readings table"
                );
                let reason = format!("no readings table for company '{}': {e}", user.company_name);
                Ok(DashboardSession::without_table(user.username, user.company_name, reason))
            },
        }
    }
}

/// bcrypt hash of `password` for provisioning the `users` table.
pub fn hash_password(password: &str, cost: u32) -> Result<String, ServiceError> {
    if password.is_empty() {
        return Err(ServiceError::InvalidInput("password must not be empty".to_owned()));
    }
    bcrypt::hash(password, cost).map_err(|e| ServiceError::InvalidInput(e.to_string()))
}
