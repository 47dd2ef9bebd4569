// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::domain::shared::models::{ConversationId, UserId};

struct TypingEntry {
    name: String,
    refreshed_at: DateTime<Utc>,
}

/// Who is currently composing, per conversation. Ephemeral, entries expire
/// when no further `userTyping` arrives within the expiry window and no stop
/// event was received.
#[derive(Default)]
pub struct TypingState {
    entries: Mutex<HashMap<ConversationId, HashMap<UserId, TypingEntry>>>,
}

impl TypingState {
    pub fn insert(
        &self,
        conversation_id: ConversationId,
        user_id: UserId,
        name: String,
        now: DateTime<Utc>,
    ) {
        self.entries.lock().entry(conversation_id).or_default().insert(
            user_id,
            TypingEntry {
                name,
                refreshed_at: now,
            },
        );
    }

    /// Returns whether an entry was actually removed.
    pub fn remove(&self, conversation_id: &ConversationId, user_id: &UserId) -> bool {
        let mut entries = self.entries.lock();
        let Some(conversation) = entries.get_mut(conversation_id) else {
            return false;
        };
        let removed = conversation.remove(user_id).is_some();
        if conversation.is_empty() {
            entries.remove(conversation_id);
        }
        removed
    }

    /// The names of users composing in `conversation_id`, expired entries
    /// excluded.
    pub fn composing_users(
        &self,
        conversation_id: &ConversationId,
        now: DateTime<Utc>,
        expiry: Duration,
    ) -> Vec<String> {
        let entries = self.entries.lock();
        let Some(conversation) = entries.get(conversation_id) else {
            return vec![];
        };
        let mut names = conversation
            .values()
            .filter(|entry| now - entry.refreshed_at < expiry)
            .map(|entry| entry.name.clone())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    /// Drops entries older than `expiry` and returns the conversations that
    /// changed.
    pub fn sweep_expired(&self, now: DateTime<Utc>, expiry: Duration) -> Vec<ConversationId> {
        let mut entries = self.entries.lock();
        let mut affected = vec![];

        entries.retain(|conversation_id, conversation| {
            let before = conversation.len();
            conversation.retain(|_, entry| now - entry.refreshed_at < expiry);
            if conversation.len() != before {
                affected.push(conversation_id.clone());
            }
            !conversation.is_empty()
        });

        affected
    }
}
