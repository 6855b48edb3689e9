//! warp filters mapping the HTTP surface onto the session controller.

use std::path::PathBuf;
use std::sync::Arc;

use warp::http::Uri;
use warp::{Filter, Rejection, Reply};

use crate::handlers::game;
use crate::session::SessionManager;

/// The `/api/games` surface.
pub fn api(
    sessions: Arc<SessionManager>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let create = warp::post()
        .and(with_sessions(Arc::clone(&sessions)))
        .and(warp::path!("api" / "games"))
        .then(game::create_game);

    let get_game = warp::get()
        .and(with_sessions(Arc::clone(&sessions)))
        .and(warp::path!("api" / "games" / String))
        .then(game::get_game);

    let get_question = warp::get()
        .and(with_sessions(Arc::clone(&sessions)))
        .and(warp::path!("api" / "games" / String / "question"))
        .then(game::get_question);

    let submit_answer = warp::post()
        .and(with_sessions(sessions))
        .and(warp::path!("api" / "games" / String / "answer"))
        .and(warp::body::json())
        .then(game::submit_answer);

    create.or(get_question).or(submit_answer).or(get_game)
}

/// Full route tree: the API plus the browser client under `/web`.
pub fn routes(
    sessions: Arc<SessionManager>,
    static_dir: PathBuf,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let site = warp::path("web").and(warp::fs::dir(static_dir));
    let root = warp::path::end().map(|| warp::redirect(Uri::from_static("/web/")));
    api(sessions).or(site).or(root)
}

fn with_sessions(
    sessions: Arc<SessionManager>,
) -> impl Filter<Extract = (Arc<SessionManager>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || Arc::clone(&sessions))
}
