// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;
use url::Url;

use crate::app::deps::{AppConfig, AppContext, AppDependencies, DynIDProvider, DynTimeProvider};
use crate::app::event_handlers::{
    ClientEventDispatcher, ConnectionEventHandler, MessagesEventHandler,
    NotificationsEventHandler, ServerEventHandlerQueue, UserStateEventHandler,
};
use crate::client::ClientInner;
use crate::client_event::ClientConversationEventType;
use crate::domain::connection::services::ConnectorProvider;
use crate::domain::messaging::models::TypingState;
use crate::infra::messaging::{CachingConversationsRepository, CachingMessagesRepository};
use crate::infra::notifications::InMemoryNotificationsRepository;
use crate::infra::rest::RestApi;
use crate::infra::socket::{SocketClient, SocketConfig, TungsteniteConnector};
use crate::infra::storage::LocalStorage;
use crate::services::{
    AccountService, ConnectionService, ConversationsService, NotificationsService,
};
use crate::util::{IDProvider, SystemTimeProvider, TimeProvider, UUIDProvider};
use crate::{Client, ClientDelegate, ClientEvent};

pub struct UndefinedStorage;
pub struct UndefinedServerUrls;

pub struct ServerUrls {
    api_url: Url,
    socket_url: Url,
}

pub struct ClientBuilder<S, U> {
    config: AppConfig,
    connector_provider: ConnectorProvider,
    delegate: Option<Box<dyn ClientDelegate>>,
    id_provider: DynIDProvider,
    server: U,
    storage: S,
    time_provider: DynTimeProvider,
}

impl ClientBuilder<UndefinedStorage, UndefinedServerUrls> {
    pub(crate) fn new() -> Self {
        ClientBuilder {
            config: Default::default(),
            connector_provider: Box::new(|| Box::new(TungsteniteConnector)),
            delegate: None,
            id_provider: Arc::new(UUIDProvider::default()),
            server: UndefinedServerUrls,
            storage: UndefinedStorage,
            time_provider: Arc::new(SystemTimeProvider::default()),
        }
    }
}

impl<U> ClientBuilder<UndefinedStorage, U> {
    pub fn set_storage(self, storage: Arc<dyn LocalStorage>) -> ClientBuilder<Arc<dyn LocalStorage>, U> {
        ClientBuilder {
            config: self.config,
            connector_provider: self.connector_provider,
            delegate: self.delegate,
            id_provider: self.id_provider,
            server: self.server,
            storage,
            time_provider: self.time_provider,
        }
    }
}

impl<S> ClientBuilder<S, UndefinedServerUrls> {
    pub fn set_server_urls(self, api_url: Url, socket_url: Url) -> ClientBuilder<S, ServerUrls> {
        ClientBuilder {
            config: self.config,
            connector_provider: self.connector_provider,
            delegate: self.delegate,
            id_provider: self.id_provider,
            server: ServerUrls {
                api_url,
                socket_url,
            },
            storage: self.storage,
            time_provider: self.time_provider,
        }
    }
}

impl<S, U> ClientBuilder<S, U> {
    pub fn set_connector_provider(mut self, connector_provider: ConnectorProvider) -> Self {
        self.connector_provider = connector_provider;
        self
    }

    pub fn set_id_provider<P: IDProvider + 'static>(mut self, id_provider: P) -> Self {
        self.id_provider = Arc::new(id_provider);
        self
    }

    pub fn set_time_provider<T: TimeProvider + 'static>(mut self, time_provider: T) -> Self {
        self.time_provider = Arc::new(time_provider);
        self
    }

    pub fn set_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_delegate(mut self, delegate: Option<Box<dyn ClientDelegate>>) -> Self {
        self.delegate = delegate;
        self
    }
}

impl ClientBuilder<Arc<dyn LocalStorage>, ServerUrls> {
    /// Assembles the client. Must run within a Tokio runtime since the
    /// connection supervisor and the periodic tasks are spawned on it.
    pub fn build(self) -> Client {
        let ctx = Arc::new(AppContext::new(self.config));
        let event_dispatcher = Arc::new(ClientEventDispatcher::new(self.delegate));
        let server_event_handler_queue = Arc::new(ServerEventHandlerQueue::new());

        let socket_client = {
            let handler_queue = server_event_handler_queue.clone();
            SocketClient::new(
                SocketConfig {
                    url: self.server.socket_url,
                    heartbeat_interval: ctx.config.heartbeat_interval,
                    reconnect_base_delay: ctx.config.reconnect_base_delay,
                    reconnect_max_delay: ctx.config.reconnect_max_delay,
                    max_reconnect_attempts: ctx.config.max_reconnect_attempts,
                },
                self.connector_provider,
                Arc::new(move |event| -> BoxFuture<'static, ()> {
                    let handler_queue = handler_queue.clone();
                    Box::pin(async move { handler_queue.handle_event(event).await })
                }),
            )
        };

        let rest_api = Arc::new(RestApi::new(self.server.api_url, ctx.clone()));

        let dependencies = AppDependencies {
            client_event_dispatcher: event_dispatcher.clone(),
            connection_service: Arc::new(socket_client),
            conversations_repo: Arc::new(CachingConversationsRepository::restore(
                self.storage.clone(),
            )),
            ctx,
            id_provider: self.id_provider,
            messages_repo: Arc::new(CachingMessagesRepository::restore(self.storage.clone())),
            local_storage: self.storage,
            messaging_service: rest_api.clone(),
            notifications_repo: Arc::new(InMemoryNotificationsRepository::default()),
            notifications_service: rest_api.clone(),
            time_provider: self.time_provider,
            typing_state: Arc::new(TypingState::default()),
            user_account_service: rest_api,
        };

        server_event_handler_queue.set_handlers(vec![
            Box::new(ConnectionEventHandler::from(&dependencies)),
            Box::new(MessagesEventHandler::from(&dependencies)),
            Box::new(NotificationsEventHandler::from(&dependencies)),
            Box::new(UserStateEventHandler::from(&dependencies)),
        ]);

        let background_tasks = spawn_background_tasks(&dependencies);

        let client_inner = Arc::new(ClientInner {
            account: AccountService::from(&dependencies),
            connection: ConnectionService::from(&dependencies),
            conversations: ConversationsService::from(&dependencies),
            notifications: NotificationsService::from(&dependencies),
            ctx: dependencies.ctx.clone(),
            background_tasks,
        });

        event_dispatcher.set_client_inner(Arc::downgrade(&client_inner));

        Client::from(client_inner)
    }
}

fn spawn_background_tasks(deps: &AppDependencies) -> Vec<JoinHandle<()>> {
    let mut tasks = Vec::new();

    // The unread-count poll, the correctness backstop for missed pushes.
    {
        let ctx = deps.ctx.clone();
        let notifications_service = deps.notifications_service.clone();
        let notifications_repo = deps.notifications_repo.clone();
        let client_event_dispatcher = deps.client_event_dispatcher.clone();

        tasks.push(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(ctx.config.unread_poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately, skip it.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                if ctx.session.read().is_none() {
                    continue;
                }

                match notifications_service.load_unread_count().await {
                    Ok(unread_count) => {
                        if unread_count != notifications_repo.unread_count().await {
                            notifications_repo.set_unread_count(unread_count).await;
                            client_event_dispatcher
                                .dispatch_event(ClientEvent::NotificationsChanged);
                        }
                    }
                    Err(err) => debug!("The unread-count poll failed: {err}"),
                }
            }
        }));
    }

    // Expiry sweep for remote typing indicators.
    {
        let ctx = deps.ctx.clone();
        let typing_state = deps.typing_state.clone();
        let time_provider = deps.time_provider.clone();
        let client_event_dispatcher = deps.client_event_dispatcher.clone();

        tasks.push(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(500));

            loop {
                ticker.tick().await;

                let affected =
                    typing_state.sweep_expired(time_provider.now(), ctx.config.typing_expiry);
                for conversation_id in affected {
                    client_event_dispatcher.dispatch_conversation_event(
                        conversation_id,
                        ClientConversationEventType::ComposingUsersChanged,
                    );
                }
            }
        }));
    }

    tasks
}
