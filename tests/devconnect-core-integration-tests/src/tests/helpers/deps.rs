// devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use devconnect_core_client::app::deps::{AppContext, AppDependencies};
use devconnect_core_client::domain::messaging::models::TypingState;
use devconnect_core_client::domain::messaging::services::mocks::MockMessagingService;
use devconnect_core_client::domain::notifications::services::mocks::MockNotificationsService;
use devconnect_core_client::infra::messaging::{
    CachingConversationsRepository, CachingMessagesRepository,
};
use devconnect_core_client::infra::notifications::InMemoryNotificationsRepository;
use devconnect_core_client::infra::storage::{InMemoryStorage, LocalStorage};
use devconnect_core_client::test::{ConstantTimeProvider, IncrementingIDProvider};

use super::{FakeConnection, RecordingEventDispatcher};

/// Wires real in-memory repositories with a fake connection, a recording
/// dispatcher and mocked REST services. The handles stay accessible for
/// assertions after `AppDependencies` has swallowed the Arcs.
pub struct TestDeps {
    pub connection: Arc<FakeConnection>,
    pub dispatcher: Arc<RecordingEventDispatcher>,
    pub time_provider: Arc<ConstantTimeProvider>,
    pub deps: AppDependencies,
}

pub struct TestDepsBuilder {
    pub connection: Arc<FakeConnection>,
    pub messaging_service: MockMessagingService,
    pub notifications_service: MockNotificationsService,
}

impl Default for TestDepsBuilder {
    fn default() -> Self {
        Self {
            connection: Arc::new(FakeConnection::connected()),
            messaging_service: MockMessagingService::new(),
            notifications_service: MockNotificationsService::new(),
        }
    }
}

impl TestDepsBuilder {
    pub fn build(self) -> TestDeps {
        let storage: Arc<dyn LocalStorage> = Arc::new(InMemoryStorage::default());
        let dispatcher = Arc::new(RecordingEventDispatcher::default());
        let time_provider = Arc::new(ConstantTimeProvider::ymd_hms(2024, 3, 1, 10, 0, 0));

        let deps = AppDependencies {
            client_event_dispatcher: dispatcher.clone(),
            connection_service: self.connection.clone(),
            conversations_repo: Arc::new(CachingConversationsRepository::restore(storage.clone())),
            ctx: Arc::new(AppContext::default()),
            id_provider: Arc::new(IncrementingIDProvider::new("id")),
            messages_repo: Arc::new(CachingMessagesRepository::restore(storage.clone())),
            local_storage: storage,
            messaging_service: Arc::new(self.messaging_service),
            notifications_repo: Arc::new(InMemoryNotificationsRepository::default()),
            notifications_service: Arc::new(self.notifications_service),
            time_provider: time_provider.clone(),
            typing_state: Arc::new(TypingState::default()),
            user_account_service: Arc::new(
                devconnect_core_client::domain::account::services::mocks::MockUserAccountService::new(),
            ),
        };

        TestDeps {
            connection: self.connection,
            dispatcher,
            time_provider,
            deps,
        }
    }
}

pub fn test_deps() -> TestDeps {
    TestDepsBuilder::default().build()
}

/// Like `test_deps`, but around an arbitrary connection implementation.
/// Used by the socket lifecycle tests where the connection under test is the
/// real `SocketClient`.
pub fn deps_with_connection(
    connection: Arc<dyn devconnect_core_client::domain::connection::services::ConnectionService>,
) -> (AppDependencies, Arc<RecordingEventDispatcher>) {
    let storage: Arc<dyn LocalStorage> = Arc::new(InMemoryStorage::default());
    let dispatcher = Arc::new(RecordingEventDispatcher::default());

    let deps = AppDependencies {
        client_event_dispatcher: dispatcher.clone(),
        connection_service: connection,
        conversations_repo: Arc::new(CachingConversationsRepository::restore(storage.clone())),
        ctx: Arc::new(AppContext::default()),
        id_provider: Arc::new(IncrementingIDProvider::new("id")),
        messages_repo: Arc::new(CachingMessagesRepository::restore(storage.clone())),
        local_storage: storage,
        messaging_service: Arc::new(MockMessagingService::new()),
        notifications_repo: Arc::new(InMemoryNotificationsRepository::default()),
        notifications_service: Arc::new(MockNotificationsService::new()),
        time_provider: Arc::new(ConstantTimeProvider::ymd_hms(2024, 3, 1, 10, 0, 0)),
        typing_state: Arc::new(TypingState::default()),
        user_account_service: Arc::new(
            devconnect_core_client::domain::account::services::mocks::MockUserAccountService::new(),
        ),
    };

    (deps, dispatcher)
}
