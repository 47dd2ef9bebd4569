// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::{OnceLock, Weak};

use crate::app::event_handlers::ClientEventDispatcherTrait;
use crate::client::ClientInner;
use crate::client_event::ClientConversationEventType;
use crate::domain::shared::models::ConversationId;
use crate::{ClientDelegate, ClientEvent};

pub struct ClientEventDispatcher {
    client: OnceLock<Weak<ClientInner>>,
    delegate: Option<Box<dyn ClientDelegate>>,
}

impl ClientEventDispatcher {
    pub fn new(delegate: Option<Box<dyn ClientDelegate>>) -> Self {
        Self {
            client: Default::default(),
            delegate,
        }
    }

    pub(crate) fn set_client_inner(&self, client_inner: Weak<ClientInner>) {
        self.client
            .set(client_inner)
            .map_err(|_| ())
            .expect("Tried to set ClientInner on ClientEventDispatcher more than once")
    }
}

impl ClientEventDispatcherTrait for ClientEventDispatcher {
    fn dispatch_event(&self, event: ClientEvent) {
        let Some(ref delegate) = self.delegate else {
            return;
        };

        let Some(client_inner) = self
            .client
            .get()
            .expect("ClientInner was not set on ClientEventDispatcher")
            .upgrade()
        else {
            return;
        };

        delegate.handle_event(client_inner.into(), event)
    }

    fn dispatch_conversation_event(
        &self,
        conversation_id: ConversationId,
        event: ClientConversationEventType,
    ) {
        self.dispatch_event(ClientEvent::ConversationChanged {
            id: conversation_id,
            r#type: event,
        })
    }
}
