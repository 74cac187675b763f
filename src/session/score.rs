use std::collections::HashMap;

use crate::session::QuizQuestion;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mastery {
    Beginner,
    Intermediate,
    Advanced,
}

impl Mastery {
    pub fn as_str(self) -> &'static str {
        match self {
            Mastery::Beginner => "Beginner",
            Mastery::Intermediate => "Intermediate",
            Mastery::Advanced => "Advanced",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub mastery: Mastery,
}

impl QuizResult {
    pub fn xp_awarded(&self) -> u32 {
        self.score as u32 * 100
    }
}

/// Tally a finished answer sheet. An answer counts only on exact string
/// equality with the question's correct answer; a missing entry is simply
/// not correct. Callers guarantee `questions` is non-empty (an empty
/// generation result never reaches scoring; it fails the session instead).
pub fn score_answers(questions: &[QuizQuestion], answers: &HashMap<usize, String>) -> QuizResult {
    let score = questions
        .iter()
        .enumerate()
        .filter(|(idx, q)| answers.get(idx).is_some_and(|a| *a == q.correct_answer))
        .count();

    let percentage = score as f64 / questions.len() as f64 * 100.0;
    QuizResult {
        score,
        total: questions.len(),
        mastery: mastery_for(percentage),
    }
}

/// Both cutoffs are strict: exactly 80% is Intermediate, exactly 50% is
/// Beginner.
fn mastery_for(percentage: f64) -> Mastery {
    if percentage > 80.0 {
        Mastery::Advanced
    } else if percentage > 50.0 {
        Mastery::Intermediate
    } else {
        Mastery::Beginner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::sample_question;

    fn answers(entries: &[(usize, &str)]) -> HashMap<usize, String> {
        entries
            .iter()
            .map(|(idx, a)| (*idx, a.to_string()))
            .collect()
    }

    #[test]
    fn all_correct_is_advanced() {
        let questions = vec![
            sample_question("q0", "B"),
            sample_question("q1", "A"),
            sample_question("q2", "C"),
        ];
        let result = score_answers(&questions, &answers(&[(0, "B"), (1, "A"), (2, "C")]));
        assert_eq!(result.score, 3);
        assert_eq!(result.total, 3);
        assert_eq!(result.mastery, Mastery::Advanced);
        assert_eq!(result.xp_awarded(), 300);
    }

    #[test]
    fn one_wrong_of_three_is_intermediate() {
        let questions = vec![
            sample_question("q0", "B"),
            sample_question("q1", "A"),
            sample_question("q2", "C"),
        ];
        let result = score_answers(&questions, &answers(&[(0, "B"), (1, "X"), (2, "C")]));
        assert_eq!(result.score, 2);
        assert_eq!(result.mastery, Mastery::Intermediate);
    }

    #[test]
    fn all_wrong_is_beginner() {
        let questions = vec![
            sample_question("q0", "B"),
            sample_question("q1", "A"),
            sample_question("q2", "C"),
        ];
        let result = score_answers(&questions, &answers(&[(0, "X"), (1, "X"), (2, "X")]));
        assert_eq!(result.score, 0);
        assert_eq!(result.mastery, Mastery::Beginner);
    }

    #[test]
    fn missing_answers_do_not_count() {
        let questions = vec![sample_question("q0", "A"), sample_question("q1", "B")];
        let result = score_answers(&questions, &answers(&[(1, "B")]));
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 2);
    }

    #[test]
    fn out_of_range_entries_are_ignored() {
        let questions = vec![sample_question("q0", "A")];
        let result = score_answers(&questions, &answers(&[(0, "A"), (7, "A")]));
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 1);
    }

    #[test]
    fn comparison_is_exact_no_trim_no_case_fold() {
        let questions = vec![sample_question("q0", "B")];
        assert_eq!(score_answers(&questions, &answers(&[(0, "b")])).score, 0);
        assert_eq!(score_answers(&questions, &answers(&[(0, " B")])).score, 0);
        assert_eq!(score_answers(&questions, &answers(&[(0, "B")])).score, 1);
    }

    #[test]
    fn mastery_boundaries_are_strict() {
        // Exactly 80%: 4/5 -> Intermediate, not Advanced.
        let five: Vec<QuizQuestion> = (0..5).map(|i| sample_question(&format!("q{i}"), "A")).collect();
        let four_right = answers(&[(0, "A"), (1, "A"), (2, "A"), (3, "A"), (4, "X")]);
        assert_eq!(score_answers(&five, &four_right).mastery, Mastery::Intermediate);

        // Exactly 50%: 1/2 -> Beginner, not Intermediate.
        let two: Vec<QuizQuestion> = (0..2).map(|i| sample_question(&format!("q{i}"), "A")).collect();
        let one_right = answers(&[(0, "A"), (1, "X")]);
        assert_eq!(score_answers(&two, &one_right).mastery, Mastery::Beginner);

        // 100% -> Advanced.
        let all_right = answers(&[(0, "A"), (1, "A")]);
        assert_eq!(score_answers(&two, &all_right).mastery, Mastery::Advanced);
    }

    #[test]
    fn score_always_within_bounds() {
        // Pseudo-random answer maps, including missing and bogus entries.
        let questions: Vec<QuizQuestion> =
            (0..7).map(|i| sample_question(&format!("q{i}"), "C")).collect();
        let pool = ["A", "B", "C", "D", "", "c", "C "];
        for seed in 0..50usize {
            let mut map = HashMap::new();
            for idx in 0..questions.len() {
                // Skip some entries to model unanswered questions.
                if (seed + idx) % 3 == 0 {
                    continue;
                }
                map.insert(idx, pool[(seed * 7 + idx * 3) % pool.len()].to_string());
            }
            let result = score_answers(&questions, &map);
            assert!(result.score <= result.total);
            let expected = (0..questions.len())
                .filter(|idx| map.get(idx).is_some_and(|a| a == "C"))
                .count();
            assert_eq!(result.score, expected);
        }
    }
}
