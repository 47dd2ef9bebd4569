// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use reqwest::Method;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::app::deps::DynAppContext;

/// The one HTTP client for the DevConnect REST API. Implements the domain
/// service traits for auth, messaging and notifications; the bearer token is
/// read from the current session on every request.
pub struct RestApi {
    pub(crate) http: reqwest::Client,
    base_url: Url,
    ctx: DynAppContext,
}

impl RestApi {
    pub fn new(base_url: Url, ctx: DynAppContext) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            ctx,
        }
    }

    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("API base URL cannot be a base")
            .extend(segments);
        url
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, url);
        if let Ok(token) = self.ctx.auth_token() {
            builder = builder.bearer_auth(token.expose_secret());
        }
        builder
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self
            .request(Method::GET, url)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post(&self, url: Url) -> Result<()> {
        self.request(Method::POST, url)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T> {
        let response = self
            .request(Method::POST, url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}
