pub mod client;
pub mod worker;

use crate::genai::client::GeminiClient;
use crate::session::QuizQuestion;

/// Fixed by the collaborator contract; the quiz flow has no adaptive sizing.
pub const QUESTIONS_PER_QUIZ: usize = 3;
pub const QUIZ_DIFFICULTY: &str = "Intermediate";

pub const TUTOR_GREETING: &str =
    "Neural link established. I am FASN, your assigned tutor construct. Query me on any \
     enrolled course material.";
pub const TUTOR_FALLBACK: &str = "Connection instability detected. Unable to process query.";

/// Chat transcript entry as the collaborator sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Model,
}

impl TurnRole {
    pub fn as_wire(self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Model => "model",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub text: String,
}

/// Failure-containing wrapper around the reply call: whatever goes wrong on
/// the wire, the chat session gets a usable line back.
pub fn tutor_reply(
    client: Option<&GeminiClient>,
    history: &[ChatTurn],
    message: &str,
    context: &str,
) -> String {
    client
        .ok_or(client::GenAiError::MissingKey)
        .and_then(|c| c.generate_reply(history, message, context))
        .unwrap_or_else(|_| TUTOR_FALLBACK.to_string())
}

/// Failure-containing wrapper around question generation: errors and
/// unusable payloads become the empty set, which is the quiz engine's
/// failure trigger. Inconsistent questions (correct answer not among the
/// options) are rejected here at ingestion.
pub fn quiz_questions(
    client: Option<&GeminiClient>,
    topic: &str,
    difficulty: &str,
) -> Vec<QuizQuestion> {
    let generated = client
        .ok_or(client::GenAiError::MissingKey)
        .and_then(|c| c.generate_questions(topic, difficulty))
        .unwrap_or_default();
    ingest(generated)
}

fn ingest(questions: Vec<QuizQuestion>) -> Vec<QuizQuestion> {
    questions.into_iter().filter(|q| q.is_consistent()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::sample_question;

    #[test]
    fn ingest_drops_inconsistent_questions() {
        let mut bad = sample_question("q1", "B");
        bad.correct_answer = "not an option".to_string();
        let kept = ingest(vec![sample_question("q0", "A"), bad, sample_question("q2", "C")]);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(QuizQuestion::is_consistent));
    }

    #[test]
    fn ingest_of_all_inconsistent_is_empty() {
        let mut bad = sample_question("q0", "A");
        bad.correct_answer = "E".to_string();
        assert!(ingest(vec![bad]).is_empty());
    }

    #[test]
    fn missing_client_yields_fallback_reply() {
        let reply = tutor_reply(None, &[], "hello?", "context");
        assert_eq!(reply, TUTOR_FALLBACK);
    }

    #[test]
    fn missing_client_yields_empty_question_set() {
        assert!(quiz_questions(None, "General", QUIZ_DIFFICULTY).is_empty());
    }
}
