//! Quiz session state.
//!
//! A session walks the question list in order, records one answer per
//! question and scores the answer sheet when the last question is answered.
//! Sessions are ephemeral: abandoning one simply drops it.

use crate::error::QuizError;
use crate::model::{ArchetypeResult, TestAnswer, TestQuestion};
use crate::scoring::{tally, top_two, ScoringConfig, TestScore};

/// What happened after an answer was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizProgress {
    /// More questions remain.
    Next,
    /// The last question was answered.
    Complete(QuizOutcome),
}

/// Score and result of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: TestScore,
    /// Chakras are not filled in yet; see [`crate::chakra::resolve_result`].
    pub result: ArchetypeResult,
}

/// An in-progress quiz.
#[derive(Debug, Clone)]
pub struct QuizSession<'a> {
    questions: &'a [TestQuestion],
    answers: Vec<TestAnswer>,
    scoring: ScoringConfig,
}

impl<'a> QuizSession<'a> {
    pub fn new(questions: &'a [TestQuestion], scoring: ScoringConfig) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        Ok(Self {
            questions,
            answers: Vec::with_capacity(questions.len()),
            scoring,
        })
    }

    /// The question awaiting an answer, or `None` once complete.
    pub fn current(&self) -> Option<&'a TestQuestion> {
        self.questions.get(self.answers.len())
    }

    /// 1-based position of the current question.
    pub fn position(&self) -> usize {
        (self.answers.len() + 1).min(self.questions.len())
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() >= self.questions.len()
    }

    /// Progress through the quiz as a percentage, counting the current
    /// question as reached.
    pub fn progress_percent(&self) -> f64 {
        self.position() as f64 / self.questions.len() as f64 * 100.0
    }

    pub fn answers(&self) -> &[TestAnswer] {
        &self.answers
    }

    /// Record the chosen option for the current question.
    pub fn answer(&mut self, option_id: &str) -> Result<QuizProgress, QuizError> {
        let question = self.current().ok_or(QuizError::AlreadyComplete)?;
        let option = question
            .option(option_id)
            .ok_or_else(|| QuizError::UnknownOption {
                question_id: question.id.clone(),
                option_id: option_id.to_string(),
            })?;

        self.answers.push(TestAnswer::from(option));
        tracing::debug!(
            question = %question.id,
            option = %option.id,
            "recorded answer {}/{}",
            self.answers.len(),
            self.questions.len()
        );

        if self.is_complete() {
            Ok(QuizProgress::Complete(self.outcome()))
        } else {
            Ok(QuizProgress::Next)
        }
    }

    /// Record the option at a 0-based index of the current question.
    pub fn answer_index(&mut self, index: usize) -> Result<QuizProgress, QuizError> {
        let question = self.current().ok_or(QuizError::AlreadyComplete)?;
        let option = question
            .options
            .get(index)
            .ok_or_else(|| QuizError::UnknownOption {
                question_id: question.id.clone(),
                option_id: format!("#{}", index + 1),
            })?;
        let option_id = option.id.clone();
        self.answer(&option_id)
    }

    fn outcome(&self) -> QuizOutcome {
        let score = tally(&self.answers);
        let top = top_two(&score, &self.scoring);
        QuizOutcome {
            result: ArchetypeResult::new(top.primary, top.secondary),
            score,
        }
    }
}

/// Score a complete answer sheet of option ids, one per question in order.
pub fn answer_all(
    questions: &[TestQuestion],
    option_ids: &[&str],
    scoring: ScoringConfig,
) -> Result<QuizOutcome, QuizError> {
    if option_ids.len() != questions.len() {
        return Err(QuizError::AnswerCountMismatch {
            expected: questions.len(),
            actual: option_ids.len(),
        });
    }

    let mut session = QuizSession::new(questions, scoring)?;
    let mut outcome = None;
    for option_id in option_ids {
        if let QuizProgress::Complete(done) = session.answer(option_id)? {
            outcome = Some(done);
        }
    }
    outcome.ok_or(QuizError::NoQuestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestOption;

    fn question(id: &str, options: &[(&str, &[&str])]) -> TestQuestion {
        TestQuestion {
            id: id.into(),
            question: format!("Question {id}"),
            options: options
                .iter()
                .map(|(opt, maps)| TestOption {
                    id: (*opt).into(),
                    question_id: id.into(),
                    label: format!("Option {opt}"),
                    maps_to: maps.iter().map(|m| m.to_string()).collect(),
                })
                .collect(),
        }
    }

    fn questions() -> Vec<TestQuestion> {
        vec![
            question("q1", &[("q1a", &["achiever"]), ("q1b", &["rebel"])]),
            question("q2", &[("q2a", &["achiever"]), ("q2b", &[])]),
            question("q3", &[("q3a", &["rebel"]), ("q3b", &["pleaser", "niceone"])]),
        ]
    }

    #[test]
    fn walks_questions_in_order() {
        let questions = questions();
        let mut session = QuizSession::new(&questions, ScoringConfig::default()).unwrap();

        assert_eq!(session.current().unwrap().id, "q1");
        assert_eq!(session.position(), 1);
        assert_eq!(session.answer("q1a").unwrap(), QuizProgress::Next);
        assert_eq!(session.current().unwrap().id, "q2");
        assert_eq!(session.answer("q2a").unwrap(), QuizProgress::Next);

        match session.answer("q3a").unwrap() {
            QuizProgress::Complete(outcome) => {
                assert_eq!(outcome.result.primary_mask_id, "achiever");
                assert_eq!(outcome.result.secondary_mask_id, "rebel");
                assert_eq!(outcome.score.get("achiever"), 2);
                assert!(outcome.result.chakra.is_empty());
            }
            other => panic!("expected completion, got {other:?}"),
        }
        assert!(session.is_complete());
        assert!(session.current().is_none());
        assert_eq!(session.answers().len(), 3);
    }

    #[test]
    fn rejects_option_from_another_question() {
        let questions = questions();
        let mut session = QuizSession::new(&questions, ScoringConfig::default()).unwrap();
        let err = session.answer("q2a").unwrap_err();
        assert_eq!(
            err,
            QuizError::UnknownOption {
                question_id: "q1".into(),
                option_id: "q2a".into()
            }
        );
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn rejects_answers_after_completion() {
        let questions = questions();
        let outcome = answer_all(&questions, &["q1b", "q2b", "q3b"], ScoringConfig::default());
        assert!(outcome.is_ok());

        let mut session = QuizSession::new(&questions[..1], ScoringConfig::default()).unwrap();
        session.answer("q1a").unwrap();
        assert_eq!(session.answer("q1a").unwrap_err(), QuizError::AlreadyComplete);
    }

    #[test]
    fn empty_quiz_is_an_error() {
        assert_eq!(
            QuizSession::new(&[], ScoringConfig::default()).unwrap_err(),
            QuizError::NoQuestions
        );
    }

    #[test]
    fn answer_by_index() {
        let questions = questions();
        let mut session = QuizSession::new(&questions, ScoringConfig::default()).unwrap();
        session.answer_index(1).unwrap();
        assert_eq!(session.answers()[0].option_id, "q1b");
        assert!(session.answer_index(5).is_err());
    }

    #[test]
    fn progress_percent_tracks_position() {
        let questions = questions();
        let mut session = QuizSession::new(&questions, ScoringConfig::default()).unwrap();
        assert!((session.progress_percent() - 100.0 / 3.0).abs() < 1e-9);
        session.answer("q1a").unwrap();
        session.answer("q2a").unwrap();
        assert!((session.progress_percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn answer_sheet_with_no_mappings_falls_back() {
        let questions = vec![question("q1", &[("q1a", &[])])];
        let outcome = answer_all(&questions, &["q1a"], ScoringConfig::default()).unwrap();
        assert!(outcome.score.is_empty());
        assert_eq!(outcome.result.primary_mask_id, "pleaser");
        assert_eq!(outcome.result.secondary_mask_id, "achiever");
    }

    #[test]
    fn answer_sheet_length_must_match() {
        let questions = questions();
        let err = answer_all(&questions, &["q1a"], ScoringConfig::default()).unwrap_err();
        assert_eq!(
            err,
            QuizError::AnswerCountMismatch {
                expected: 3,
                actual: 1
            }
        );
    }

    #[test]
    fn tie_in_answer_sheet_uses_id_order() {
        let questions = questions();
        let outcome = answer_all(&questions, &["q1b", "q2b", "q3b"], ScoringConfig::default())
            .unwrap();
        // rebel 1, pleaser 1, niceone 1
        assert_eq!(outcome.result.primary_mask_id, "niceone");
        assert_eq!(outcome.result.secondary_mask_id, "pleaser");
    }
}
