use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::PageScope;
use crate::api::SoulBuddyApi;
use crate::models::{format_paragraphs, ChatHistory, ChatMessage, ChatRequest};
use crate::state::AppState;

pub const APOLOGY: &str =
    "I apologize, but I'm having trouble connecting right now. Please try again in a moment.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum SendOutcome {
    /// Blank input, nothing was sent
    Ignored,
    Replied(ChatMessage),
    /// The backend failed and the apology was appended instead
    Apologized(ChatMessage),
    /// The page was left before the reply arrived
    Discarded,
}

pub struct ChatPage {
    state: AppState,
    api: Arc<dyn SoulBuddyApi>,
    history: ChatHistory,
    max_length: u32,
}

impl ChatPage {
    pub fn new(state: AppState, api: Arc<dyn SoulBuddyApi>, max_length: u32) -> Self {
        Self {
            state,
            api,
            history: ChatHistory::default(),
            max_length,
        }
    }

    pub fn transcript(&self) -> &ChatHistory {
        &self.history
    }

    pub async fn send(&mut self, text: &str, scope: &PageScope) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }

        // Context is what the user saw before typing this message
        let request = ChatRequest {
            message: text.to_string(),
            conversation_history: self.history.conversation(),
            max_length: self.max_length,
            birth_details: self.state.birth_details(),
        };
        let question = ChatMessage::user(text);

        info!(
            "Sending chat message with {} turns of context",
            request.conversation_history.len()
        );
        let api = Arc::clone(&self.api);
        let reply = match scope.guard(async { api.chat(&request).await }).await {
            None => {
                info!("Chat page left before the reply arrived, discarding");
                return SendOutcome::Discarded;
            }
            Some(reply) => reply,
        };

        match reply {
            Ok(reply) => {
                let message = ChatMessage::bot(format_paragraphs(&reply.response));
                self.record_exchange(question, message.clone());
                SendOutcome::Replied(message)
            }
            Err(e) => {
                warn!("Chat request failed: {}", e);
                let message = ChatMessage::bot(APOLOGY);
                self.record_exchange(question, message.clone());
                SendOutcome::Apologized(message)
            }
        }
    }

    /// A question only enters the transcript together with its answer
    fn record_exchange(&mut self, question: ChatMessage, answer: ChatMessage) {
        self.history.push(question);
        self.history.push(answer);
    }
}
