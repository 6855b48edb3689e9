use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;
use trivio_engine::bank::QuestionBank;

use crate::routes;
use crate::session::{SessionError, SessionManager};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    host: String,
    port: u16,
    static_dir: PathBuf,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            port,
            static_dir: static_dir.into(),
        }
    }

    pub fn for_tests() -> Self {
        let dir = std::env::temp_dir().join("trivio_web_static");
        Self::new("127.0.0.1", 0, dir)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }
}

#[derive(Debug, Clone)]
pub struct AppContext {
    config: ServerConfig,
    sessions: Arc<SessionManager>,
}

impl AppContext {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        if !config.static_dir().exists() {
            fs::create_dir_all(config.static_dir())
                .map_err(|err| ServerError::ConfigError(err.to_string()))?;
        }

        let sessions = Arc::new(SessionManager::new(QuestionBank::builtin()));
        Ok(Self::new_with_dependencies(config, sessions))
    }

    pub fn new_with_dependencies(config: ServerConfig, sessions: Arc<SessionManager>) -> Self {
        Self { config, sessions }
    }

    pub fn new_for_tests() -> Self {
        Self::new(ServerConfig::for_tests()).expect("test context")
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn sessions(&self) -> Arc<SessionManager> {
        Arc::clone(&self.sessions)
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    Bind(warp::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Session error: {0}")]
    SessionError(#[from] SessionError),
}

pub struct WebServer {
    ctx: AppContext,
}

impl WebServer {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Binds the listener and starts serving. Must run inside a tokio
    /// runtime; requests in flight are drained on shutdown.
    pub fn start(&self) -> Result<ServerHandle, ServerError> {
        let config = self.ctx.config();
        let ip: IpAddr = config
            .host()
            .parse()
            .map_err(|_| ServerError::ConfigError(format!("invalid host: {}", config.host())))?;
        let addr = SocketAddr::new(ip, config.port());

        let filter = routes::routes(self.ctx.sessions(), config.static_dir().to_path_buf());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let (bound, serve) = warp::serve(filter)
            .try_bind_with_graceful_shutdown(addr, async move {
                shutdown_rx.await.ok();
            })
            .map_err(ServerError::Bind)?;

        info!(addr = %bound, "server listening");
        let task = tokio::spawn(serve);
        Ok(ServerHandle {
            addr: bound,
            shutdown: Some(shutdown_tx),
            task,
        })
    }
}

pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signals shutdown and waits for the server task to drain.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.task.await;
    }
}
