// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;

pub use fs_storage::FsStorage;
pub use in_memory_storage::InMemoryStorage;

mod fs_storage;
mod in_memory_storage;

/// Flat string key/value persistence with local-storage semantics. Session
/// data and the conversation/message mirrors live here and survive restarts
/// for degraded offline reads.
pub trait LocalStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER: &str = "user";
    pub const CONVERSATIONS: &str = "userConversations";
    pub const MESSAGES: &str = "userMessages";
}
