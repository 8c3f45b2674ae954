//! # Message Log
//!
//! Append-only transcript. The only way in is [`MessageLog::append`]; the only
//! way out is a shared slice, so records cannot be edited or removed once stored.
//!
//! Observers subscribe to a `watch` channel carrying the record count. Every
//! append bumps it, which is what the view uses to auto-scroll and redraw.

use tokio::sync::watch;

use crate::core::message::Message;

pub struct MessageLog {
    messages: Vec<Message>,
    changes: watch::Sender<usize>,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageLog {
    /// Creates a log seeded with the welcome record.
    pub fn new() -> Self {
        let messages = vec![Message::welcome()];
        let (changes, _) = watch::channel(messages.len());
        Self { messages, changes }
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.changes.send_replace(self.messages.len());
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false for a log built with [`MessageLog::new`].
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn user_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_user()).count()
    }

    /// Assistant replies, excluding the seeded welcome record.
    pub fn reply_count(&self) -> usize {
        self.messages
            .iter()
            .skip(1)
            .filter(|m| m.is_assistant())
            .count()
    }

    /// Subscribe to change notifications. The value is the current record count.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.changes.subscribe()
    }
}

impl<'a> IntoIterator for &'a MessageLog {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
