use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Game is not in progress")]
    NotInProgress,
    #[error("Player not found in this game: {0}")]
    UnknownParticipant(String),
    #[error("Game has already finished")]
    AlreadyFinished,
}
