//! Append-only conversation log shared by all agents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One exchange turn. Entries are never edited or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Ordered, unbounded record of user/assistant turns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Role::User, content.into());
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Role::Assistant, content.into());
    }

    fn push(&mut self, role: Role, content: String) {
        self.entries.push(ConversationEntry {
            role,
            content,
            timestamp: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest-first iteration, for memory lookups.
    pub fn iter_rev(&self) -> impl Iterator<Item = &ConversationEntry> {
        self.entries.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_insertion_order() {
        let mut log = ConversationLog::new();
        log.push_user("你好");
        log.push_assistant("您好，有什么可以帮您？");
        log.push_user("再见");

        assert_eq!(log.len(), 3);
        assert_eq!(log.entries()[0].role, Role::User);
        assert_eq!(log.entries()[1].role, Role::Assistant);
        assert_eq!(log.iter_rev().next().unwrap().content, "再见");
    }
}
