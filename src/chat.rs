use chrono::{DateTime, Utc};

use crate::genai::{ChatTurn, TurnRole};
use crate::ui::line_input::LineInput;

#[derive(Clone, Debug)]
pub struct ChatMessage {
    pub role: TurnRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: TurnRole, text: String) -> Self {
        Self {
            role,
            text,
            timestamp: Utc::now(),
        }
    }
}

/// Tutor chat overlay state. One outstanding reply request at most; while it
/// is pending the send affordance is disabled rather than queued.
pub struct ChatPanel {
    pub open: bool,
    pub messages: Vec<ChatMessage>,
    pub input: LineInput,
    pending: Option<u64>,
    next_request: u64,
}

impl ChatPanel {
    pub fn new() -> Self {
        Self {
            open: false,
            messages: vec![ChatMessage::new(
                TurnRole::Model,
                crate::genai::TUTOR_GREETING.to_string(),
            )],
            input: LineInput::new(""),
            pending: None,
            next_request: 0,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Starts one send: snapshots the history, appends the user message, and
    /// hands back what the worker needs. Returns None while a reply is
    /// outstanding (re-entrancy guard) or when the input is blank.
    pub fn begin_send(&mut self) -> Option<(u64, Vec<ChatTurn>, String)> {
        if self.pending.is_some() {
            return None;
        }
        let text = self.input.value().trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.input.clear();

        // History excludes the message being sent; the collaborator receives
        // it separately.
        let history = self.history();
        self.messages.push(ChatMessage::new(TurnRole::User, text.clone()));

        let request = self.next_request;
        self.next_request += 1;
        self.pending = Some(request);
        Some((request, history, text))
    }

    /// Applies a finished reply. A request id that is not the live one
    /// belongs to a discarded send and is dropped.
    pub fn resolve(&mut self, request: u64, text: String) {
        if self.pending != Some(request) {
            return;
        }
        self.pending = None;
        self.messages.push(ChatMessage::new(TurnRole::Model, text));
    }

    /// Back to the seeded transcript; used on logout.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn history(&self) -> Vec<ChatTurn> {
        self.messages
            .iter()
            .map(|m| ChatTurn {
                role: m.role,
                text: m.text.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(panel: &mut ChatPanel, text: &str) {
        for ch in text.chars() {
            panel.input.handle(crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char(ch),
                crossterm::event::KeyModifiers::NONE,
            ));
        }
    }

    #[test]
    fn starts_with_greeting() {
        let panel = ChatPanel::new();
        assert_eq!(panel.messages.len(), 1);
        assert_eq!(panel.messages[0].role, TurnRole::Model);
        assert!(!panel.is_pending());
    }

    #[test]
    fn begin_send_snapshots_history_before_user_message() {
        let mut panel = ChatPanel::new();
        type_text(&mut panel, "What is EOQ?");
        let (_, history, message) = panel.begin_send().unwrap();
        assert_eq!(message, "What is EOQ?");
        // Greeting only; the outgoing message is not part of the history.
        assert_eq!(history.len(), 1);
        assert_eq!(panel.messages.len(), 2);
        assert_eq!(panel.messages[1].role, TurnRole::User);
    }

    #[test]
    fn blank_input_does_not_send() {
        let mut panel = ChatPanel::new();
        type_text(&mut panel, "   ");
        assert!(panel.begin_send().is_none());
        assert_eq!(panel.messages.len(), 1);
    }

    #[test]
    fn second_send_blocked_while_pending() {
        let mut panel = ChatPanel::new();
        type_text(&mut panel, "first");
        assert!(panel.begin_send().is_some());
        type_text(&mut panel, "second");
        assert!(panel.begin_send().is_none());
    }

    #[test]
    fn resolve_matching_request_appends_reply() {
        let mut panel = ChatPanel::new();
        type_text(&mut panel, "question");
        let (request, _, _) = panel.begin_send().unwrap();
        panel.resolve(request, "answer".to_string());
        assert!(!panel.is_pending());
        assert_eq!(panel.messages.last().unwrap().text, "answer");
    }

    #[test]
    fn stale_reply_is_dropped() {
        let mut panel = ChatPanel::new();
        type_text(&mut panel, "question");
        let (request, _, _) = panel.begin_send().unwrap();
        panel.resolve(request + 40, "stale".to_string());
        assert!(panel.is_pending());
        assert_eq!(panel.messages.len(), 2);
    }

    #[test]
    fn reset_restores_seeded_state() {
        let mut panel = ChatPanel::new();
        type_text(&mut panel, "question");
        panel.begin_send().unwrap();
        panel.open = true;
        panel.reset();
        assert_eq!(panel.messages.len(), 1);
        assert!(!panel.open);
        assert!(!panel.is_pending());
    }
}
