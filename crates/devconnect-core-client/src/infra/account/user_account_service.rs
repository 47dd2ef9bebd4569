// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::account::models::UserProfile;
use crate::domain::account::services::{AuthError, AuthResponse, Registration, UserAccountService};
use crate::infra::rest::RestApi;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponsePayload {
    token: String,
    user: UserProfile,
}

#[async_trait]
impl UserAccountService for RestApi {
    async fn log_in(
        &self,
        email: &str,
        password: Secret<String>,
    ) -> Result<AuthResponse, AuthError> {
        let response = self
            .http
            .post(self.endpoint(&["auth", "login"]))
            .json(&LoginRequest {
                email,
                password: password.expose_secret(),
            })
            .send()
            .await
            .map_err(|err| AuthError::Other(err.into()))?;

        parse_auth_response(response).await
    }

    async fn sign_up(&self, registration: Registration) -> Result<AuthResponse, AuthError> {
        let response = self
            .http
            .post(self.endpoint(&["auth", "register"]))
            .json(&RegisterRequest {
                name: &registration.name,
                email: &registration.email,
                password: registration.password.expose_secret(),
            })
            .send()
            .await
            .map_err(|err| AuthError::Other(err.into()))?;

        parse_auth_response(response).await
    }
}

async fn parse_auth_response(response: reqwest::Response) -> Result<AuthResponse, AuthError> {
    match response.status() {
        status if status.is_success() => {
            let payload = response
                .json::<AuthResponsePayload>()
                .await
                .map_err(|err| AuthError::Other(err.into()))?;
            Ok(AuthResponse {
                user: payload.user,
                token: Secret::new(payload.token),
            })
        }
        StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST => Err(AuthError::InvalidCredentials),
        StatusCode::CONFLICT => Err(AuthError::AccountExists),
        status => Err(AuthError::Server(format!(
            "The server responded with status {status}"
        ))),
    }
}
