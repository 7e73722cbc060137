//! Feed data model.

use serde::{Deserialize, Serialize};

/// A single webhook message as returned by the backend.
///
/// Opaque beyond its two fields. `timestamp` doubles as the list key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the backend received the payload.
    pub timestamp: String,
    /// The stored payload, usually JSON-encoded text.
    pub data: String,
}

impl Message {
    /// Create a message.
    pub fn new(timestamp: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            data: data.into(),
        }
    }
}

/// Everything the view needs to draw the feed.
///
/// `messages` is only ever replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    messages: Vec<Message>,
    search_query: String,
}

impl FeedState {
    /// Empty state with an empty search term.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty state starting from the given search term.
    pub fn with_search_query(search_query: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            search_query: search_query.into(),
        }
    }

    /// Messages in display order, top to bottom.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The current search text.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub(crate) fn set_search_query(&mut self, search_query: String) {
        self.search_query = search_query;
    }

    pub(crate) fn replace_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }
}
