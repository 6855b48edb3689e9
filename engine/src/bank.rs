use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::question::Question;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("Failed to read question file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse question file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Question bank is empty")]
    Empty,
}

/// Ordered, read-only sequence of questions. Sessions take a private
/// copy at creation, so swapping the bank never affects in-flight duels.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Compiled-in default bank.
    pub fn builtin() -> Self {
        Self::new(vec![
            Question {
                id: "q1".into(),
                text: "What is the capital of France?".into(),
                answer: "Paris".into(),
                kind: None,
            },
            Question {
                id: "q2".into(),
                text: "What is 2 + 2?".into(),
                answer: "4".into(),
                kind: None,
            },
            Question {
                id: "q3".into(),
                text: "What language is this backend written in?".into(),
                answer: "Rust".into(),
                kind: None,
            },
        ])
    }

    /// Loads a bank from a JSON array of questions (answers included).
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, BankError> {
        let raw = fs::read_to_string(path)?;
        let questions: Vec<Question> = serde_json::from_str(&raw)?;
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self::new(questions))
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Private copy of the full sequence for a new duel.
    pub fn snapshot(&self) -> Vec<Question> {
        self.questions.clone()
    }
}
