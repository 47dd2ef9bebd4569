// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use in_memory_notifications_repository::InMemoryNotificationsRepository;

mod in_memory_notifications_repository;
mod notifications_service;
