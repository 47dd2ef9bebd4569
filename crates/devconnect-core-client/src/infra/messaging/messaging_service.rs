// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::domain::messaging::models::{ConversationSummary, RemoteMessage};
use crate::domain::messaging::services::MessagingService;
use crate::domain::shared::models::{ConversationId, UserId};
use crate::infra::rest::RestApi;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDirectRequest<'a> {
    user_id: &'a UserId,
}

#[async_trait]
impl MessagingService for RestApi {
    async fn load_conversations(&self) -> Result<Vec<ConversationSummary>> {
        self.get_json(self.endpoint(&["conversations"])).await
    }

    async fn load_conversation(&self, id: &ConversationId) -> Result<ConversationSummary> {
        self.get_json(self.endpoint(&["conversations", id.as_str()]))
            .await
    }

    async fn load_messages(&self, id: &ConversationId) -> Result<Vec<RemoteMessage>> {
        self.get_json(self.endpoint(&["conversations", id.as_str(), "messages"]))
            .await
    }

    async fn load_latest_message(&self, id: &ConversationId) -> Result<Option<RemoteMessage>> {
        let mut url = self.endpoint(&["conversations", id.as_str(), "messages"]);
        url.query_pairs_mut().append_pair("limit", "1");

        let response = self.request(Method::GET, url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let mut messages = response
            .error_for_status()?
            .json::<Vec<RemoteMessage>>()
            .await?;
        Ok(messages.pop())
    }

    async fn mark_messages_read(&self, id: &ConversationId) -> Result<()> {
        self.post(self.endpoint(&["conversations", id.as_str(), "read"]))
            .await
    }

    async fn create_direct_conversation(&self, user_id: &UserId) -> Result<ConversationSummary> {
        self.post_json(
            self.endpoint(&["conversations", "direct"]),
            &CreateDirectRequest { user_id },
        )
        .await
    }
}
