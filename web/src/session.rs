use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use trivio_engine::bank::QuestionBank;
use trivio_engine::duel::{AnswerOutcome, Duel, DuelStatus};
use trivio_engine::errors::GameError;
use trivio_engine::logger::{AnswerRecord, MatchLogger};
use trivio_engine::participant::Participant;

use crate::ident;

pub type SessionId = String;

const SEAT_NAMES: [&str; 2] = ["Player1", "Player2"];

/// Process-wide registry of live duels plus the operations layer that
/// drives them. Constructed once at startup and injected wherever it is
/// needed; there is no global instance.
///
/// Two independent lock levels: the registry lock guards only the
/// id-to-session map, and each `DuelSession` carries its own lock. The
/// registry lock is always released before a session lock is taken, so
/// one duel never blocks another.
#[derive(Debug)]
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, Arc<DuelSession>>>,
    bank: QuestionBank,
    answer_log: Option<Mutex<MatchLogger>>,
}

impl SessionManager {
    pub fn new(bank: QuestionBank) -> Self {
        Self { sessions: RwLock::new(HashMap::new()), bank, answer_log: None }
    }

    pub fn with_answer_log(bank: QuestionBank, logger: MatchLogger) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            bank,
            answer_log: Some(Mutex::new(logger)),
        }
    }

    /// Creates a duel with two fixed seats and registers it. The full
    /// snapshot comes back including both participant ids: that is how
    /// a client learns which seat it occupies, not a security boundary.
    pub fn create_session(&self) -> Result<SessionSnapshot, SessionError> {
        let id = ident::opaque_id();
        let first = Participant::new(ident::opaque_id(), SEAT_NAMES[0]);
        let second = Participant::new(ident::opaque_id(), SEAT_NAMES[1]);
        let duel = Duel::new(id.clone(), first, second, self.bank.snapshot());
        let session = Arc::new(DuelSession { id: id.clone(), duel: RwLock::new(duel) });

        self.register(Arc::clone(&session))?;
        info!(session_id = %id, "session created");
        session.snapshot()
    }

    /// Id generation is best-effort unique, so insertion still checks
    /// for a collision instead of silently overwriting a live duel.
    fn register(&self, session: Arc<DuelSession>) -> Result<(), SessionError> {
        let mut guard = self.sessions.write().map_err(|_| SessionError::StoragePoisoned)?;
        if guard.contains_key(&session.id) {
            return Err(SessionError::DuplicateSession(session.id.clone()));
        }
        guard.insert(session.id.clone(), session);
        Ok(())
    }

    pub fn get_session(&self, id: &str) -> Option<Arc<DuelSession>> {
        self.sessions
            .read()
            .ok()
            .and_then(|guard| guard.get(id).cloned())
    }

    fn resolve(&self, id: &str) -> Result<Arc<DuelSession>, SessionError> {
        self.get_session(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    pub fn snapshot(&self, id: &str) -> Result<SessionSnapshot, SessionError> {
        self.resolve(id)?.snapshot()
    }

    /// The question at the session's cursor, without its answer.
    pub fn current_question(&self, id: &str) -> Result<CurrentQuestion, SessionError> {
        let session = self.resolve(id)?;
        let duel = session.duel.read().map_err(|_| SessionError::StoragePoisoned)?;
        match duel.current_question()? {
            Some(question) => Ok(CurrentQuestion::Question {
                id: question.id.clone(),
                text: question.text.clone(),
                index: duel.cursor(),
            }),
            None => Ok(CurrentQuestion::Exhausted),
        }
    }

    /// Grades one submission under the session's exclusive lock.
    /// Concurrent submissions to the same session serialize here; each
    /// one observes a distinct cursor position.
    pub fn submit_answer(
        &self,
        id: &str,
        participant_id: &str,
        answer: &str,
    ) -> Result<AnswerOutcome, SessionError> {
        let session = self.resolve(id)?;
        let outcome = {
            let mut duel = session.duel.write().map_err(|_| SessionError::StoragePoisoned)?;
            duel.submit_answer(participant_id, answer)?
        };

        info!(
            session_id = %id,
            participant_id = %participant_id,
            question_id = %outcome.question_id,
            correct = outcome.verdict.is_correct(),
            "answer graded"
        );
        if outcome.status == DuelStatus::Finished {
            info!(session_id = %id, "session finished");
        }
        self.log_answer(id, participant_id, answer, &outcome);
        Ok(outcome)
    }

    fn log_answer(
        &self,
        session_id: &str,
        participant_id: &str,
        submitted: &str,
        outcome: &AnswerOutcome,
    ) {
        let Some(log) = &self.answer_log else { return };
        let record = AnswerRecord {
            game_id: session_id.to_string(),
            participant_id: participant_id.to_string(),
            question_id: outcome.question_id.clone(),
            submitted: submitted.to_string(),
            correct: outcome.verdict.is_correct(),
            score: outcome.score,
            ts: None,
        };
        match log.lock() {
            Ok(mut logger) => {
                if let Err(err) = logger.write(&record) {
                    warn!(%err, "failed to append answer record");
                }
            }
            Err(_) => warn!("answer log lock poisoned"),
        }
    }

    pub fn active_sessions(&self) -> Vec<SessionId> {
        match self.sessions.read() {
            Ok(guard) => guard.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// One registered duel. The session is the unit of locking: every read
/// or write of its state goes through `duel`'s lock, independent of the
/// registry lock and of every other session.
#[derive(Debug)]
pub struct DuelSession {
    id: SessionId,
    duel: RwLock<Duel>,
}

impl DuelSession {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Point-in-time copy of the visible state, taken under the shared
    /// lock. Never includes answers.
    pub fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let duel = self.duel.read().map_err(|_| SessionError::StoragePoisoned)?;
        Ok(SessionSnapshot {
            id: duel.id().to_string(),
            players: duel.participants().clone(),
            current_question_index: duel.cursor(),
            status: duel.status(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub players: HashMap<String, Participant>,
    #[serde(rename = "currentQuestionIndex")]
    pub current_question_index: usize,
    pub status: DuelStatus,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CurrentQuestion {
    Question { id: String, text: String, index: usize },
    Exhausted,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Game not found: {0}")]
    NotFound(SessionId),
    #[error("Player not found in this game: {0}")]
    ParticipantNotFound(String),
    #[error("Game is not in progress")]
    NotInProgress,
    #[error("Game has already finished")]
    AlreadyFinished,
    #[error("Duplicate game id: {0}")]
    DuplicateSession(SessionId),
    #[error("Session storage poisoned")]
    StoragePoisoned,
}

impl From<GameError> for SessionError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::NotInProgress => Self::NotInProgress,
            GameError::UnknownParticipant(id) => Self::ParticipantNotFound(id),
            GameError::AlreadyFinished => Self::AlreadyFinished,
        }
    }
}
