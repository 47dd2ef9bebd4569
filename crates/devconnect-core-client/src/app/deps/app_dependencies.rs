// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use crate::app::deps::app_context::AppContext;
use crate::app::event_handlers::ClientEventDispatcherTrait;
use crate::domain::account::services::UserAccountService;
use crate::domain::connection::services::ConnectionService;
use crate::domain::messaging::models::TypingState;
use crate::domain::messaging::repos::{ConversationsRepository, MessagesRepository};
use crate::domain::messaging::services::MessagingService;
use crate::domain::notifications::repos::NotificationsRepository;
use crate::domain::notifications::services::NotificationsService;
use crate::infra::storage::LocalStorage;
use crate::util::{IDProvider, TimeProvider};

pub(crate) type DynAppContext = Arc<AppContext>;
pub(crate) type DynClientEventDispatcher = Arc<dyn ClientEventDispatcherTrait>;
pub(crate) type DynConnectionService = Arc<dyn ConnectionService>;
pub(crate) type DynConversationsRepository = Arc<dyn ConversationsRepository>;
pub(crate) type DynIDProvider = Arc<dyn IDProvider>;
pub(crate) type DynLocalStorage = Arc<dyn LocalStorage>;
pub(crate) type DynMessagesRepository = Arc<dyn MessagesRepository>;
pub(crate) type DynMessagingService = Arc<dyn MessagingService>;
pub(crate) type DynNotificationsRepository = Arc<dyn NotificationsRepository>;
pub(crate) type DynNotificationsService = Arc<dyn NotificationsService>;
pub(crate) type DynTimeProvider = Arc<dyn TimeProvider>;
pub(crate) type DynTypingState = Arc<TypingState>;
pub(crate) type DynUserAccountService = Arc<dyn UserAccountService>;

pub struct AppDependencies {
    pub client_event_dispatcher: DynClientEventDispatcher,
    pub connection_service: DynConnectionService,
    pub conversations_repo: DynConversationsRepository,
    pub ctx: DynAppContext,
    pub id_provider: DynIDProvider,
    pub local_storage: DynLocalStorage,
    pub messages_repo: DynMessagesRepository,
    pub messaging_service: DynMessagingService,
    pub notifications_repo: DynNotificationsRepository,
    pub notifications_service: DynNotificationsService,
    pub time_provider: DynTimeProvider,
    pub typing_state: DynTypingState,
    pub user_account_service: DynUserAccountService,
}
