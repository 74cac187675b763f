use std::collections::HashMap;

use crate::session::QuizQuestion;
use crate::session::score::{self, QuizResult};

/// Monotonic id handed out per quiz session. Generation responses carry the
/// id of the session that issued them; anything else is stale and dropped.
pub type SessionId = u64;

/// Answer sheet shared by the Ready and Submitted phases.
#[derive(Clone, Debug)]
pub struct QuizForm {
    questions: Vec<QuizQuestion>,
    pub current: usize,
    answers: HashMap<usize, String>,
}

impl QuizForm {
    fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            current: 0,
            answers: HashMap::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn question(&self) -> &QuizQuestion {
        &self.questions[self.current]
    }

    pub fn answer_for(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(|s| s.as_str())
    }

    pub fn current_answered(&self) -> bool {
        self.answers.contains_key(&self.current)
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }
}

#[derive(Clone, Debug)]
pub enum QuizPhase {
    /// Question generation outstanding.
    Loading,
    /// Questions on hand, answers being collected.
    Ready(QuizForm),
    /// Answers locked, correct answer revealed, result not yet computed.
    Submitted(QuizForm),
    /// Result computed; terminal.
    Finished(QuizResult),
    /// Generation produced nothing usable; terminal, return is the only exit.
    Failed,
}

/// One quiz run for one topic, from Loading to a terminal phase.
pub struct QuizSession {
    pub id: SessionId,
    pub topic: String,
    phase: QuizPhase,
}

impl QuizSession {
    pub fn new(id: SessionId, topic: String) -> Self {
        Self {
            id,
            topic,
            phase: QuizPhase::Loading,
        }
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    /// Delivers the generation result. Only meaningful in Loading; an empty
    /// set fails the session. Late duplicates (session already resolved) are
    /// ignored.
    pub fn resolve(&mut self, questions: Vec<QuizQuestion>) {
        if !matches!(self.phase, QuizPhase::Loading) {
            return;
        }
        self.phase = if questions.is_empty() {
            QuizPhase::Failed
        } else {
            QuizPhase::Ready(QuizForm::new(questions))
        };
    }

    /// Records an answer for the current question. Locked once submitted.
    pub fn select_option(&mut self, option: &str) {
        if let QuizPhase::Ready(form) = &mut self.phase {
            form.answers.insert(form.current, option.to_string());
        }
    }

    /// Forward motion: only while collecting answers, only once the current
    /// question is answered, never past the last question.
    pub fn next(&mut self) {
        if let QuizPhase::Ready(form) = &mut self.phase {
            if form.current_answered() && !form.is_last() {
                form.current += 1;
            }
        }
    }

    /// Backward motion stays legal after submission so the learner can look
    /// back over the locked sheet.
    pub fn previous(&mut self) {
        if let QuizPhase::Ready(form) | QuizPhase::Submitted(form) = &mut self.phase {
            form.current = form.current.saturating_sub(1);
        }
    }

    /// Locks the sheet. Legal only on the last question with its answer
    /// recorded.
    pub fn submit(&mut self) {
        self.phase = match std::mem::replace(&mut self.phase, QuizPhase::Failed) {
            QuizPhase::Ready(form) if form.is_last() && form.current_answered() => {
                QuizPhase::Submitted(form)
            }
            other => other,
        };
    }

    /// Computes the result exactly once. Calling again on a finished session
    /// returns the already-stored result unchanged; any other phase yields
    /// nothing.
    pub fn finish(&mut self) -> Option<QuizResult> {
        match &self.phase {
            QuizPhase::Submitted(form) => {
                let result = score::score_answers(&form.questions, &form.answers);
                self.phase = QuizPhase::Finished(result.clone());
                Some(result)
            }
            QuizPhase::Finished(result) => Some(result.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::sample_question;
    use crate::session::score::Mastery;

    fn three_questions() -> Vec<QuizQuestion> {
        vec![
            sample_question("q0", "B"),
            sample_question("q1", "A"),
            sample_question("q2", "C"),
        ]
    }

    fn ready_session() -> QuizSession {
        let mut session = QuizSession::new(1, "Unit 3: Inventory Management".to_string());
        session.resolve(three_questions());
        session
    }

    fn answer_all(session: &mut QuizSession, answers: &[&str]) {
        for (i, a) in answers.iter().enumerate() {
            session.select_option(a);
            if i + 1 < answers.len() {
                session.next();
            }
        }
    }

    #[test]
    fn empty_generation_fails_the_session() {
        let mut session = QuizSession::new(1, "General".to_string());
        session.resolve(Vec::new());
        assert!(matches!(session.phase(), QuizPhase::Failed));
        // A failed session never yields a result.
        assert!(session.finish().is_none());
    }

    #[test]
    fn resolve_is_loading_only() {
        let mut session = ready_session();
        // A late duplicate delivery must not reset a live form.
        session.select_option("B");
        session.resolve(Vec::new());
        assert!(matches!(session.phase(), QuizPhase::Ready(_)));
    }

    #[test]
    fn full_run_all_correct() {
        let mut session = ready_session();
        answer_all(&mut session, &["B", "A", "C"]);
        session.submit();
        assert!(matches!(session.phase(), QuizPhase::Submitted(_)));
        let result = session.finish().unwrap();
        assert_eq!(result.score, 3);
        assert_eq!(result.total, 3);
        assert_eq!(result.mastery, Mastery::Advanced);
    }

    #[test]
    fn one_wrong_lands_intermediate() {
        let mut session = ready_session();
        answer_all(&mut session, &["B", "X", "C"]);
        session.submit();
        let result = session.finish().unwrap();
        assert_eq!(result.score, 2);
        assert_eq!(result.mastery, Mastery::Intermediate);
    }

    #[test]
    fn all_wrong_lands_beginner() {
        let mut session = ready_session();
        answer_all(&mut session, &["X", "X", "X"]);
        session.submit();
        let result = session.finish().unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.mastery, Mastery::Beginner);
    }

    #[test]
    fn finish_is_idempotent() {
        let mut session = ready_session();
        answer_all(&mut session, &["B", "A", "C"]);
        session.submit();
        let first = session.finish().unwrap();
        let second = session.finish().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn next_requires_answer_and_stops_at_last() {
        let mut session = ready_session();
        // Unanswered: no forward motion.
        session.next();
        let QuizPhase::Ready(form) = session.phase() else { panic!() };
        assert_eq!(form.current, 0);

        answer_all(&mut session, &["B", "A", "C"]);
        let QuizPhase::Ready(form) = session.phase() else { panic!() };
        assert_eq!(form.current, 2);
        // Answered but already on the last question: clamped.
        session.next();
        let QuizPhase::Ready(form) = session.phase() else { panic!() };
        assert_eq!(form.current, 2);
    }

    #[test]
    fn previous_clamps_at_zero() {
        let mut session = ready_session();
        session.previous();
        let QuizPhase::Ready(form) = session.phase() else { panic!() };
        assert_eq!(form.current, 0);
    }

    #[test]
    fn submit_rejected_before_last_question() {
        let mut session = ready_session();
        session.select_option("B");
        session.submit();
        assert!(matches!(session.phase(), QuizPhase::Ready(_)));
    }

    #[test]
    fn submit_rejected_when_last_unanswered() {
        let mut session = ready_session();
        session.select_option("B");
        session.next();
        session.select_option("A");
        session.next();
        // On the last question without an answer.
        session.submit();
        assert!(matches!(session.phase(), QuizPhase::Ready(_)));
    }

    #[test]
    fn answers_lock_after_submit() {
        let mut session = ready_session();
        answer_all(&mut session, &["B", "A", "C"]);
        session.submit();
        session.select_option("X");
        let result = session.finish().unwrap();
        assert_eq!(result.score, 3);
    }

    #[test]
    fn previous_allowed_after_submit_for_review() {
        let mut session = ready_session();
        answer_all(&mut session, &["B", "A", "C"]);
        session.submit();
        session.previous();
        let QuizPhase::Submitted(form) = session.phase() else { panic!() };
        assert_eq!(form.current, 1);
    }

    #[test]
    fn reanswering_overwrites_previous_choice() {
        let mut session = ready_session();
        session.select_option("X");
        session.select_option("B");
        let QuizPhase::Ready(form) = session.phase() else { panic!() };
        assert_eq!(form.answer_for(0), Some("B"));
    }

    #[test]
    fn answer_map_never_leaves_question_range() {
        let mut session = ready_session();
        answer_all(&mut session, &["B", "A", "C"]);
        // Walk back and forth to stress cursor motion.
        session.previous();
        session.previous();
        session.previous();
        session.next();
        session.next();
        session.next();
        session.select_option("C");
        let QuizPhase::Ready(form) = session.phase() else { panic!() };
        for idx in form.answers.keys() {
            assert!(*idx < form.total());
        }
    }
}
