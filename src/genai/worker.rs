use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use crate::event::AppEvent;
use crate::genai::client::GeminiClient;
use crate::genai::{self, ChatTurn};
use crate::session::QuizQuestion;
use crate::session::quiz::SessionId;

/// Resolution of a one-shot generation request, delivered through the event
/// channel. Each variant carries the id of the issuer; the app drops any
/// event whose id no longer matches the live session/request.
pub enum GenEvent {
    Questions {
        session: SessionId,
        questions: Vec<QuizQuestion>,
    },
    Reply {
        request: u64,
        text: String,
    },
}

/// Fire the question-generation request for a quiz session. The spawned
/// thread owns the blocking call; failures are already contained inside
/// `genai::quiz_questions`, so the only outcome is an event. A send error
/// means the UI is gone, which is fine to ignore.
pub fn spawn_quiz_request(
    tx: Sender<AppEvent>,
    client: Option<Arc<GeminiClient>>,
    session: SessionId,
    topic: String,
) {
    thread::spawn(move || {
        let questions =
            genai::quiz_questions(client.as_deref(), &topic, genai::QUIZ_DIFFICULTY);
        let _ = tx.send(AppEvent::Gen(GenEvent::Questions { session, questions }));
    });
}

/// Fire a tutor-reply request for one chat turn.
pub fn spawn_chat_request(
    tx: Sender<AppEvent>,
    client: Option<Arc<GeminiClient>>,
    request: u64,
    history: Vec<ChatTurn>,
    message: String,
    context: String,
) {
    thread::spawn(move || {
        let text = genai::tutor_reply(client.as_deref(), &history, &message, &context);
        let _ = tx.send(AppEvent::Gen(GenEvent::Reply { request, text }));
    });
}
