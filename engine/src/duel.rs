//! The per-session state machine: two participants, a fixed question
//! sequence, a shared cursor, and a forward-only status.

use std::collections::HashMap;

use serde::Serialize;

use crate::errors::GameError;
use crate::participant::Participant;
use crate::question::Question;
use crate::rules::{self, Verdict};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DuelStatus {
    Waiting,
    InProgress,
    Finished,
}

/// Result of grading one submission. The correct answer is revealed
/// here, after submission, and nowhere else.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub verdict: Verdict,
    pub question_id: String,
    pub score: u32,
    pub correct_answer: String,
    pub status: DuelStatus,
}

/// One duel's mutable state. Pure in-memory logic; the web layer owns
/// the locking around it.
///
/// Invariants: `cursor <= questions.len()`, and `cursor == questions.len()`
/// exactly when the status is `Finished`. The question sequence never
/// changes after creation.
#[derive(Debug)]
pub struct Duel {
    id: String,
    participants: HashMap<String, Participant>,
    questions: Vec<Question>,
    cursor: usize,
    status: DuelStatus,
}

impl Duel {
    /// Duels start in progress with the cursor at zero. A duel over an
    /// empty question sequence has nothing to play and starts finished.
    pub fn new(
        id: impl Into<String>,
        first: Participant,
        second: Participant,
        questions: Vec<Question>,
    ) -> Self {
        let status = if questions.is_empty() {
            DuelStatus::Finished
        } else {
            DuelStatus::InProgress
        };
        let mut participants = HashMap::with_capacity(2);
        participants.insert(first.id.clone(), first);
        participants.insert(second.id.clone(), second);
        Self { id: id.into(), participants, questions, cursor: 0, status }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> DuelStatus {
        self.status
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn participants(&self) -> &HashMap<String, Participant> {
        &self.participants
    }

    /// Question at the cursor, or `None` once the sequence is exhausted.
    /// The exhausted case is tolerated rather than treated as an error;
    /// callers are expected to have seen the finished status already.
    pub fn current_question(&self) -> Result<Option<&Question>, GameError> {
        if self.status != DuelStatus::InProgress {
            return Err(GameError::NotInProgress);
        }
        Ok(self.questions.get(self.cursor))
    }

    /// Grades one submission against the question at the cursor.
    ///
    /// Whichever participant answers first advances the shared cursor
    /// for both seats; the cursor moves on every submission, correct or
    /// not. When it reaches the end of the sequence the duel finishes.
    pub fn submit_answer(
        &mut self,
        participant_id: &str,
        answer: &str,
    ) -> Result<AnswerOutcome, GameError> {
        if self.status != DuelStatus::InProgress {
            return Err(GameError::NotInProgress);
        }
        if !self.participants.contains_key(participant_id) {
            return Err(GameError::UnknownParticipant(participant_id.to_string()));
        }
        let Some(question) = self.questions.get(self.cursor) else {
            return Err(GameError::AlreadyFinished);
        };

        let verdict = rules::judge(&question.answer, answer);
        let question_id = question.id.clone();
        let correct_answer = question.answer.clone();

        let score = match self.participants.get_mut(participant_id) {
            Some(participant) => {
                if verdict.is_correct() {
                    participant.award_point();
                }
                participant.score
            }
            None => return Err(GameError::UnknownParticipant(participant_id.to_string())),
        };

        self.cursor += 1;
        if self.cursor == self.questions.len() {
            self.status = DuelStatus::Finished;
        }

        Ok(AnswerOutcome { verdict, question_id, score, correct_answer, status: self.status })
    }
}
