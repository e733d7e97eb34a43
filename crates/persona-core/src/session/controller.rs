//! Conversation session controller.
//!
//! Owns the session state and sequences calls to the persona service.
//! Operations take `&self` so the shell can select a personality or read a
//! snapshot while a send or extraction is awaiting the service. The busy
//! flag is checked and set in the same state update that admits an
//! operation; `send_message` and `extract_memory` are refused while it is
//! set, and so is `clear`.

use tokio::sync::watch;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use persona_types::chat::{
    ChatRequest, ChatResponse, Comparison, ExtractMemoryRequest, ExtractMemoryResponse,
};
use persona_types::error::SessionError;
use persona_types::memory::Memory;
use persona_types::message::Message;

use crate::personality::Personality;
use crate::service::PersonaService;
use crate::session::state::SessionState;

/// Returns the controller to idle when an admitted operation ends, including
/// when its future is dropped mid-flight.
struct BusyGuard<'a> {
    state: &'a watch::Sender<SessionState>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| std::mem::replace(&mut state.busy, false));
    }
}

/// Single-conversation controller generic over the service port.
pub struct SessionController<S: PersonaService> {
    service: S,
    user_id: String,
    session_id: Uuid,
    state: watch::Sender<SessionState>,
}

impl<S: PersonaService> SessionController<S> {
    /// Create a controller in the initial state: idle, no messages, default
    /// personality, no memory or comparison.
    pub fn new(service: S, user_id: impl Into<String>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            service,
            user_id: user_id.into(),
            session_id: Uuid::now_v7(),
            state,
        }
    }

    /// Client-side id of this conversation (logging only).
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Send a user message and merge the reply.
    ///
    /// The user's message is appended before the call and stays appended if
    /// the call fails. On success the extracted memory, the comparison, and
    /// the assistant reply are applied in one update.
    pub async fn send_message(&self, text: &str) -> Result<ChatResponse, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        let mut admitted = Err(SessionError::Busy);
        self.state.send_if_modified(|state| {
            if state.busy {
                return false;
            }
            if !state.has_room_for_exchange() {
                admitted = Err(SessionError::conversation_full());
                return false;
            }
            state.messages.push(Message::user(text));
            state.busy = true;
            admitted = Ok(ChatRequest {
                messages: state.messages.clone(),
                personality: state.selected_personality.id.to_string(),
                user_id: self.user_id.clone(),
            });
            true
        });
        let request = admitted.inspect_err(|e| debug!(error = %e, "Send rejected"))?;
        let _guard = BusyGuard { state: &self.state };

        let span = info_span!(
            "persona.chat",
            session_id = %self.session_id,
            personality = %request.personality,
            message_count = request.messages.len(),
        );

        match self.service.chat(&request).instrument(span).await {
            Ok(response) => {
                self.state.send_modify(|state| {
                    state.extracted_memory = response.extracted_memory.clone();
                    state.last_comparison = Some(Comparison::from(&response));
                    state.messages.push(Message::assistant(response.response.clone()));
                    state.busy = false;
                });
                info!(
                    session_id = %self.session_id,
                    personality = %response.personality,
                    memory_items = response.extracted_memory.as_ref().map_or(0, Memory::item_count),
                    "Chat reply merged"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(session_id = %self.session_id, error = %e, "Chat request failed");
                Err(SessionError::SendFailed(e))
            }
        }
    }

    /// Ask the service to extract memory from the whole conversation.
    ///
    /// Replaces the extracted memory wholesale on success; never touches the
    /// messages. The response is returned whole so the caller can show the
    /// service's accumulated `total_memory`.
    pub async fn extract_memory(&self) -> Result<ExtractMemoryResponse, SessionError> {
        let mut admitted = Err(SessionError::Busy);
        self.state.send_if_modified(|state| {
            if state.busy {
                return false;
            }
            if state.messages.is_empty() {
                admitted = Err(SessionError::NothingToExtract);
                return false;
            }
            state.busy = true;
            admitted = Ok(ExtractMemoryRequest {
                messages: state.messages.clone(),
                user_id: self.user_id.clone(),
            });
            true
        });
        let request = admitted.inspect_err(|e| debug!(error = %e, "Extraction rejected"))?;
        let _guard = BusyGuard { state: &self.state };

        let span = info_span!(
            "persona.extract_memory",
            session_id = %self.session_id,
            message_count = request.messages.len(),
        );

        match self.service.extract_memory(&request).instrument(span).await {
            Ok(response) => {
                self.state.send_modify(|state| {
                    state.extracted_memory = response.extracted_memory.clone();
                    state.busy = false;
                });
                info!(
                    session_id = %self.session_id,
                    memory_items = response.extracted_memory.as_ref().map_or(0, Memory::item_count),
                    total_items = response.total_memory.as_ref().map_or(0, |t| t.memory.item_count()),
                    "Memory extracted"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(session_id = %self.session_id, error = %e, "Memory extraction failed");
                Err(SessionError::ExtractFailed(e))
            }
        }
    }

    /// Reset the conversation, memory, and comparison.
    ///
    /// The selected personality survives. Refused while a call is in flight
    /// so a late reply cannot repopulate a cleared conversation.
    pub fn clear(&self) -> Result<(), SessionError> {
        let mut result = Ok(());
        self.state.send_if_modified(|state| {
            if state.busy {
                result = Err(SessionError::Busy);
                return false;
            }
            state.messages.clear();
            state.extracted_memory = None;
            state.last_comparison = None;
            true
        });
        if result.is_ok() {
            debug!(session_id = %self.session_id, "Conversation cleared");
        }
        result
    }

    /// Select the personality used by the next send. Allowed at any time.
    pub fn select_personality(&self, personality: &'static Personality) {
        self.state
            .send_modify(|state| state.selected_personality = personality);
        debug!(session_id = %self.session_id, personality = personality.id, "Personality selected");
    }
}
