// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use secrecy::Secret;

use crate::domain::account::models::UserProfile;

/// Errors from the user-initiated auth flows. Unlike the write-behind
/// operations these are surfaced to the UI as form-level messages.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("An account with these details exists already")]
    AccountExists,
    #[error("{0}")]
    Server(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub struct AuthResponse {
    pub user: UserProfile,
    pub token: Secret<String>,
}

pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: Secret<String>,
}

#[async_trait]
#[cfg_attr(feature = "test", mockall::automock)]
pub trait UserAccountService: Send + Sync {
    async fn log_in(
        &self,
        email: &str,
        password: Secret<String>,
    ) -> Result<AuthResponse, AuthError>;

    async fn sign_up(&self, registration: Registration) -> Result<AuthResponse, AuthError>;
}
