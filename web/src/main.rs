use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trivio_engine::bank::QuestionBank;
use trivio_engine::logger::MatchLogger;
use trivio_web::config::{self, Config};
use trivio_web::server::{AppContext, ServerConfig, ServerError, WebServer};
use trivio_web::session::SessionManager;

#[derive(Parser, Debug)]
#[command(name = "trivio-server", version, about = "Two-player trivia duel server")]
struct ServerCli {
    /// Address to listen on
    #[arg(long)]
    host: Option<String>,
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,
    /// JSON question bank (defaults to the built-in bank)
    #[arg(long)]
    questions: Option<PathBuf>,
    /// Directory served under /web
    #[arg(long)]
    static_dir: Option<PathBuf>,
    /// JSONL answer audit log
    #[arg(long)]
    answer_log: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = ServerCli::parse();
    let mut cfg = config::load().map_err(|err| ServerError::ConfigError(err.to_string()))?;
    apply_overrides(&mut cfg, cli);

    let bank = match &cfg.questions {
        Some(path) => QuestionBank::from_json_file(path)
            .map_err(|err| ServerError::ConfigError(err.to_string()))?,
        None => QuestionBank::builtin(),
    };
    info!(questions = bank.len(), "question bank loaded");

    let sessions = match &cfg.answer_log {
        Some(path) => SessionManager::with_answer_log(bank, MatchLogger::create(path)?),
        None => SessionManager::new(bank),
    };

    std::fs::create_dir_all(&cfg.static_dir)?;
    let server_config = ServerConfig::new(cfg.host.clone(), cfg.port, cfg.static_dir.clone());
    let ctx = AppContext::new_with_dependencies(server_config, Arc::new(sessions));

    let handle = WebServer::new(ctx).start()?;
    info!(addr = %handle.addr(), "trivio server ready");

    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");
    handle.stop().await;
    Ok(())
}

fn apply_overrides(cfg: &mut Config, cli: ServerCli) {
    if let Some(host) = cli.host {
        cfg.host = host;
    }
    if let Some(port) = cli.port {
        cfg.port = port;
    }
    if let Some(path) = cli.questions {
        cfg.questions = Some(path);
    }
    if let Some(dir) = cli.static_dir {
        cfg.static_dir = dir;
    }
    if let Some(path) = cli.answer_log {
        cfg.answer_log = Some(path);
    }
}
