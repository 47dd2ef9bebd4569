// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::domain::shared::models::UserId;

/// The profile of the logged-in user as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// The authenticated session. Exists from login (or restore) until logout.
#[derive(Clone)]
pub struct Session {
    pub user: UserProfile,
    pub auth_token: Secret<String>,
}

impl Session {
    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }
}
