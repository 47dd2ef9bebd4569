// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use account_service::AccountService;
pub use connection_service::ConnectionService;
pub use conversations_service::ConversationsService;
pub use notifications_service::NotificationsService;

mod account_service;
mod connection_service;
mod conversations_service;
mod notifications_service;
