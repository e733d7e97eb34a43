//! The controller's single mutable state record.
//!
//! Fields are crate-private: only `SessionController` mutates them. The shell
//! reads snapshots through the accessors.

use persona_types::chat::Comparison;
use persona_types::memory::Memory;
use persona_types::message::{MAX_MESSAGES, Message};

use crate::comparison::ComparisonView;
use crate::memory::view::MemoryView;
use crate::personality::{self, Personality};

/// Messages added by one successful send: the user's and the assistant's.
const MESSAGES_PER_EXCHANGE: usize = 2;

#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) messages: Vec<Message>,
    pub(crate) selected_personality: &'static Personality,
    pub(crate) extracted_memory: Option<Memory>,
    pub(crate) last_comparison: Option<Comparison>,
    pub(crate) busy: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            selected_personality: personality::default_personality(),
            extracted_memory: None,
            last_comparison: None,
            busy: false,
        }
    }
}

impl SessionState {
    /// Conversation so far, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn selected_personality(&self) -> &'static Personality {
        self.selected_personality
    }

    pub fn extracted_memory(&self) -> Option<&Memory> {
        self.extracted_memory.as_ref()
    }

    pub fn last_comparison(&self) -> Option<&Comparison> {
        self.last_comparison.as_ref()
    }

    /// True while a remote call is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn is_full(&self) -> bool {
        self.messages.len() >= MAX_MESSAGES
    }

    /// Whether a user message plus its reply still fit under the cap.
    pub fn has_room_for_exchange(&self) -> bool {
        self.messages.len() + MESSAGES_PER_EXCHANGE <= MAX_MESSAGES
    }

    pub fn can_send(&self) -> bool {
        !self.busy && self.has_room_for_exchange()
    }

    pub fn can_extract(&self) -> bool {
        !self.busy && !self.messages.is_empty()
    }

    pub fn can_clear(&self) -> bool {
        !self.busy
    }

    pub fn memory_view(&self) -> MemoryView {
        MemoryView::from(self.extracted_memory.as_ref())
    }

    pub fn comparison_view(&self) -> Option<ComparisonView> {
        self.last_comparison.as_ref().map(ComparisonView::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(count: usize) -> SessionState {
        SessionState {
            messages: (0..count).map(|i| Message::user(format!("m{i}"))).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_state() {
        let state = SessionState::default();
        assert!(state.messages().is_empty());
        assert_eq!(state.selected_personality().id, "calm_mentor");
        assert!(state.extracted_memory().is_none());
        assert!(state.last_comparison().is_none());
        assert!(!state.is_busy());
        assert_eq!(state.memory_view(), MemoryView::Absent);
        assert!(state.comparison_view().is_none());
    }

    #[test]
    fn test_capacity_boundaries() {
        assert!(state_with(28).has_room_for_exchange());
        assert!(!state_with(29).has_room_for_exchange());
        assert!(!state_with(29).is_full());
        assert!(state_with(30).is_full());
        assert!(!state_with(30).can_send());
    }

    #[test]
    fn test_busy_gates_mutating_intents() {
        let mut state = state_with(2);
        assert!(state.can_send() && state.can_extract() && state.can_clear());
        state.busy = true;
        assert!(!state.can_send());
        assert!(!state.can_extract());
        assert!(!state.can_clear());
    }

    #[test]
    fn test_cannot_extract_empty_conversation() {
        assert!(!SessionState::default().can_extract());
    }
}
