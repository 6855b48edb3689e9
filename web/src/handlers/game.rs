use std::sync::Arc;

use serde::{Deserialize, Serialize};
use trivio_engine::duel::DuelStatus;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

use crate::session::{CurrentQuestion, SessionError, SessionId, SessionManager};

#[derive(Debug, Deserialize)]
pub struct AnswerPayload {
    #[serde(rename = "playerId")]
    pub player_id: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
struct QuestionResponse {
    id: String,
    text: String,
    index: usize,
}

#[derive(Debug, Serialize)]
struct ExhaustedResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct AnswerResponse {
    result: &'static str,
    #[serde(rename = "yourScore")]
    your_score: u32,
    #[serde(rename = "correctAnswer")]
    correct_answer: String,
    #[serde(rename = "gameStatus")]
    game_status: DuelStatus,
}

pub async fn create_game(sessions: Arc<SessionManager>) -> Response {
    match sessions.create_session() {
        Ok(snapshot) => success_response(StatusCode::CREATED, snapshot),
        Err(err) => session_error(&err),
    }
}

pub async fn get_game(sessions: Arc<SessionManager>, game_id: SessionId) -> Response {
    match sessions.snapshot(&game_id) {
        Ok(snapshot) => success_response(StatusCode::OK, snapshot),
        Err(err) => session_error(&err),
    }
}

pub async fn get_question(sessions: Arc<SessionManager>, game_id: SessionId) -> Response {
    match sessions.current_question(&game_id) {
        Ok(CurrentQuestion::Question { id, text, index }) => {
            success_response(StatusCode::OK, QuestionResponse { id, text, index })
        }
        Ok(CurrentQuestion::Exhausted) => success_response(
            StatusCode::OK,
            ExhaustedResponse { message: "No more questions" },
        ),
        Err(err) => session_error(&err),
    }
}

pub async fn submit_answer(
    sessions: Arc<SessionManager>,
    game_id: SessionId,
    payload: AnswerPayload,
) -> Response {
    match sessions.submit_answer(&game_id, &payload.player_id, &payload.answer) {
        Ok(outcome) => success_response(
            StatusCode::OK,
            AnswerResponse {
                result: outcome.verdict.as_str(),
                your_score: outcome.score,
                correct_answer: outcome.correct_answer,
                game_status: outcome.status,
            },
        ),
        Err(err) => session_error(&err),
    }
}

fn success_response<T>(status: StatusCode, body: T) -> Response
where
    T: Serialize,
{
    reply::with_status(reply::json(&body), status).into_response()
}

fn session_error(err: &SessionError) -> Response {
    let (status, message) = match err {
        SessionError::NotFound(_) => (StatusCode::NOT_FOUND, "Game not found"),
        SessionError::ParticipantNotFound(_) => {
            (StatusCode::NOT_FOUND, "Player not found in this game")
        }
        SessionError::NotInProgress => (StatusCode::BAD_REQUEST, "Game is not in progress"),
        SessionError::AlreadyFinished => (StatusCode::BAD_REQUEST, "Game has already finished"),
        SessionError::DuplicateSession(_) | SessionError::StoragePoisoned => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    };
    error_response(status, message)
}

fn error_response(status: StatusCode, error: &'static str) -> Response {
    #[derive(Serialize)]
    struct ErrorBody {
        error: &'static str,
    }

    reply::with_status(reply::json(&ErrorBody { error }), status).into_response()
}
