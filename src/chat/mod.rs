//! Portfolio chat engine
//!
//! Conversation state machine for the AI assistant panel. Owns the
//! transcript, the per-session message quota, and the turn lifecycle;
//! network streaming lives in [`crate::gemini`] and the UI drives this
//! controller with fragments as they arrive.

pub mod fingerprint;
pub mod quota;

use tracing::{debug, info, warn};

use crate::gemini::Content;
use crate::profile::ProfileData;

pub use fingerprint::generate_fingerprint;
pub use quota::{QuotaStore, UserQuotaRecord, MAX_USER_MESSAGES};

/// Fixed reply shown when no API key is configured
pub const UNAVAILABLE_MESSAGE: &str =
    "The AI assistant is currently unavailable. Please try again later.";

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// One transcript entry
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}

/// Lifecycle of the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// No request in flight
    Idle,
    /// Request submitted, no fragment received yet
    Sending,
    /// Fragments arriving
    Streaming,
}

/// Conversation controller for the assistant panel.
///
/// Pure state machine: every transition is a synchronous method call, so
/// the whole turn lifecycle is testable without a network. The quota
/// record is persisted through the store on every user message, before
/// any request leaves, so a failed stream still consumes quota.
pub struct ChatController {
    messages: Vec<ChatMessage>,
    state: TurnState,
    error: Option<String>,
    record: UserQuotaRecord,
    store: QuotaStore,
}

impl ChatController {
    /// Create a controller bound to a quota store and fingerprint
    pub fn new(store: QuotaStore, session_fingerprint: &str) -> Self {
        let record = store
            .load(session_fingerprint)
            .unwrap_or_else(|| UserQuotaRecord::new(session_fingerprint));

        info!(
            "Chat session: {} of {} messages used, banned={}",
            record.message_count, MAX_USER_MESSAGES, record.is_banned
        );

        Self {
            messages: Vec::new(),
            state: TurnState::Idle,
            error: None,
            record,
            store,
        }
    }

    /// Transcript in display order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Current turn state
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Whether a request is in flight
    pub fn is_busy(&self) -> bool {
        self.state != TurnState::Idle
    }

    /// Last turn error, if the previous turn failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether this session has exhausted its quota
    pub fn is_banned(&self) -> bool {
        self.record.is_banned
    }

    /// Messages still available this session
    pub fn remaining_messages(&self) -> u32 {
        self.record.remaining()
    }

    /// Seed the opening assistant greeting.
    ///
    /// Idempotent: a non-empty transcript is left untouched, so repeated
    /// panel activations never duplicate the greeting. A `None` profile
    /// (load failure) gets the generic variant.
    pub fn init_greeting(&mut self, profile: Option<&ProfileData>) {
        if !self.messages.is_empty() {
            return;
        }

        let text = if self.record.is_banned {
            "Hello! You have reached the message limit for this AI assistant. \
             Feel free to explore the rest of the portfolio."
                .to_string()
        } else {
            match profile {
                Some(profile) => format!(
                    "Hello! I'm {}'s AI assistant. Ask me anything about their \
                     experience, projects, or skills.",
                    profile.full_name()
                ),
                None => "Hello! I'm an AI assistant for this portfolio. Ask me \
                         anything about it."
                    .to_string(),
            }
        };

        self.messages.push(ChatMessage::assistant(text));
    }

    /// Attempt to start a turn for the given user input.
    ///
    /// Returns `false` as a silent no-op when a turn is already in flight,
    /// the session is banned, the quota is exhausted, or the input is
    /// blank. On acceptance the user message and an empty assistant
    /// placeholder are appended and the quota is consumed immediately.
    pub fn begin_send(&mut self, text: &str) -> bool {
        let text = text.trim();

        if text.is_empty()
            || self.is_busy()
            || self.record.is_banned
            || self.record.message_count >= MAX_USER_MESSAGES
        {
            debug!("Send attempt ignored (busy, banned, or empty input)");
            return false;
        }

        self.error = None;
        self.messages.push(ChatMessage::user(text));

        // Quota is consumed before the request leaves; a later stream
        // failure does not refund it.
        self.record.record_message();
        if let Err(e) = self.store.save(&self.record) {
            warn!("Failed to persist quota record: {}", e);
        }

        self.messages.push(ChatMessage::assistant(""));
        self.state = TurnState::Sending;
        true
    }

    /// Append one streamed fragment to the assistant placeholder
    pub fn apply_fragment(&mut self, fragment: &str) {
        if !self.is_busy() {
            return;
        }
        self.state = TurnState::Streaming;

        if let Some(last) = self.messages.last_mut() {
            if last.sender == Sender::Assistant {
                last.text.push_str(fragment);
            }
        }
    }

    /// Mark the in-flight turn as completed
    pub fn finish_stream(&mut self) {
        self.state = TurnState::Idle;
    }

    /// Mark the in-flight turn as failed.
    ///
    /// The assistant placeholder is removed only while still empty; a
    /// partial reply stays in the transcript above the error notice.
    pub fn fail_stream(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("Chat turn failed: {}", message);

        if let Some(last) = self.messages.last() {
            if last.sender == Sender::Assistant && last.text.is_empty() {
                self.messages.pop();
            }
        }

        self.error = Some(message);
        self.state = TurnState::Idle;
    }

    /// Transcript as API contents for the next generation call.
    ///
    /// The trailing empty placeholder and the seeded greeting are
    /// conversation furniture, not model context, and are skipped.
    pub fn conversation_contents(&self) -> Vec<Content> {
        self.messages
            .iter()
            .filter(|m| !m.text.is_empty())
            .skip_while(|m| m.sender == Sender::Assistant)
            .map(|m| match m.sender {
                Sender::User => Content::user(&m.text),
                Sender::Assistant => Content::model(&m.text),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> (tempfile::TempDir, ChatController) {
        let dir = tempfile::tempdir().unwrap();
        let store = QuotaStore::at(dir.path().join("quota.json"));
        let controller = ChatController::new(store, "test-fp");
        (dir, controller)
    }

    #[test]
    fn test_greeting_is_idempotent() {
        let (_dir, mut chat) = controller();

        chat.init_greeting(None);
        chat.init_greeting(None);

        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].sender, Sender::Assistant);
    }

    #[test]
    fn test_greeting_uses_profile_name() {
        let (_dir, mut chat) = controller();
        let profile = crate::profile::sample_profile();

        chat.init_greeting(Some(&profile));
        assert!(chat.messages()[0].text.contains("Ada Lovelace"));
    }

    #[test]
    fn test_fragments_concatenate() {
        let (_dir, mut chat) = controller();

        assert!(chat.begin_send("hi"));
        chat.apply_fragment("Hel");
        chat.apply_fragment("lo");
        chat.apply_fragment("!");
        chat.finish_stream();

        let last = chat.messages().last().unwrap();
        assert_eq!(last.text, "Hello!");
        assert_eq!(chat.state(), TurnState::Idle);
    }

    #[test]
    fn test_busy_turn_rejects_sends() {
        let (_dir, mut chat) = controller();

        assert!(chat.begin_send("first"));
        assert!(!chat.begin_send("second"));
        assert_eq!(chat.messages().len(), 2);
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let (_dir, mut chat) = controller();

        assert!(!chat.begin_send("   "));
        assert!(chat.messages().is_empty());
        assert_eq!(chat.remaining_messages(), MAX_USER_MESSAGES);
    }

    #[test]
    fn test_quota_exhausts_after_limit() {
        let (_dir, mut chat) = controller();

        for i in 0..MAX_USER_MESSAGES {
            assert!(chat.begin_send(&format!("message {i}")));
            chat.apply_fragment("ok");
            chat.finish_stream();
        }

        assert!(chat.is_banned());
        assert!(!chat.begin_send("one more"));
        assert_eq!(chat.messages().len(), (MAX_USER_MESSAGES * 2) as usize);
    }

    #[test]
    fn test_failed_stream_consumes_quota() {
        let (_dir, mut chat) = controller();
        let before = chat.messages().len();

        assert!(chat.begin_send("hi"));
        chat.fail_stream("network down");

        // Placeholder removed, user message kept: net one entry added.
        assert_eq!(chat.messages().len(), before + 1);
        assert_eq!(chat.remaining_messages(), MAX_USER_MESSAGES - 1);
        assert!(chat.error().is_some());
    }

    #[test]
    fn test_partial_reply_survives_failure() {
        let (_dir, mut chat) = controller();

        chat.begin_send("hi");
        chat.apply_fragment("partial");
        chat.fail_stream("cut off");

        let last = chat.messages().last().unwrap();
        assert_eq!(last.text, "partial");
    }

    #[test]
    fn test_quota_persists_across_controllers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quota.json");

        let mut chat = ChatController::new(QuotaStore::at(&path), "test-fp");
        chat.begin_send("hi");
        chat.finish_stream();

        let chat = ChatController::new(QuotaStore::at(&path), "test-fp");
        assert_eq!(chat.remaining_messages(), MAX_USER_MESSAGES - 1);
    }

    #[test]
    fn test_banned_greeting_mentions_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quota.json");

        let mut chat = ChatController::new(QuotaStore::at(&path), "test-fp");
        for i in 0..MAX_USER_MESSAGES {
            chat.begin_send(&format!("m{i}"));
            chat.finish_stream();
        }

        let mut chat = ChatController::new(QuotaStore::at(&path), "test-fp");
        chat.init_greeting(None);
        assert!(chat.messages()[0].text.contains("limit"));
    }

    #[test]
    fn test_conversation_contents_skip_furniture() {
        let (_dir, mut chat) = controller();

        chat.init_greeting(None);
        chat.begin_send("question");

        let contents = chat.conversation_contents();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0].role.as_deref(), Some("user"));
    }
}
