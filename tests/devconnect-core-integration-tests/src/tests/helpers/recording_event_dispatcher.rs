// devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use parking_lot::Mutex;

use devconnect_core_client::app::event_handlers::ClientEventDispatcherTrait;
use devconnect_core_client::dtos::ConversationId;
use devconnect_core_client::{ClientConversationEventType, ClientEvent};

#[derive(Default)]
pub struct RecordingEventDispatcher {
    events: Mutex<Vec<ClientEvent>>,
}

impl RecordingEventDispatcher {
    pub fn events(&self) -> Vec<ClientEvent> {
        self.events.lock().clone()
    }

    pub fn drain(&self) -> Vec<ClientEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl ClientEventDispatcherTrait for RecordingEventDispatcher {
    fn dispatch_event(&self, event: ClientEvent) {
        self.events.lock().push(event);
    }

    fn dispatch_conversation_event(
        &self,
        conversation_id: ConversationId,
        event: ClientConversationEventType,
    ) {
        self.events.lock().push(ClientEvent::ConversationChanged {
            id: conversation_id,
            r#type: event,
        });
    }
}
