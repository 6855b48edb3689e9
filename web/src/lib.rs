pub mod config;
pub mod handlers;
pub mod ident;
pub mod routes;
pub mod server;
pub mod session;

pub use server::{ServerHandle, WebServer};

pub use server::{AppContext, ServerConfig, ServerError};
pub use session::{CurrentQuestion, SessionError, SessionId, SessionManager, SessionSnapshot};
