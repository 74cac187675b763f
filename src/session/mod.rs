pub mod quiz;
pub mod score;

use serde::{Deserialize, Serialize};

/// One generated multiple-choice question. Option identity is the exact
/// option string: order is meaningful, duplicates are tolerated, and answer
/// checking never trims or case-folds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    /// A question is answerable only if its correct answer is actually one of
    /// its options. Generated sets are filtered on this at ingestion.
    pub fn is_consistent(&self) -> bool {
        self.options.iter().any(|o| *o == self.correct_answer)
    }
}

#[cfg(test)]
pub(crate) fn sample_question(prompt: &str, correct: &str) -> QuizQuestion {
    QuizQuestion {
        question: prompt.to_string(),
        options: vec![
            "A".to_string(),
            "B".to_string(),
            "C".to_string(),
            "D".to_string(),
        ],
        correct_answer: correct.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_uses_camel_case() {
        let q: QuizQuestion = serde_json::from_str(
            r#"{"question":"Pick one","options":["x","y"],"correctAnswer":"y"}"#,
        )
        .unwrap();
        assert_eq!(q.correct_answer, "y");
        assert!(q.is_consistent());
    }

    #[test]
    fn consistency_is_exact_match() {
        let mut q = sample_question("q", "B");
        assert!(q.is_consistent());
        q.correct_answer = "b".to_string();
        assert!(!q.is_consistent());
        q.correct_answer = " B".to_string();
        assert!(!q.is_consistent());
    }
}
