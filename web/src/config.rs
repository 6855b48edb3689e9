use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub questions: Option<PathBuf>,
    pub answer_log: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            static_dir: "static".into(),
            questions: None,
            answer_log: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Defaults, overlaid by a TOML file named in `TRIVIO_CONFIG`, overlaid
/// by individual environment variables.
pub fn load() -> Result<Config, ConfigError> {
    let mut cfg = Config::default();
    if let Ok(path) = std::env::var("TRIVIO_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        apply_file(&mut cfg, f);
    }

    if let Ok(host) = std::env::var("TRIVIO_HOST") {
        if !host.is_empty() {
            cfg.host = host;
        }
    }
    if let Ok(port) = std::env::var("TRIVIO_PORT") {
        if !port.is_empty() {
            cfg.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid("Invalid port".into()))?;
        }
    }
    if let Ok(path) = std::env::var("TRIVIO_QUESTIONS") {
        if !path.is_empty() {
            cfg.questions = Some(path.into());
        }
    }
    if let Ok(path) = std::env::var("TRIVIO_ANSWER_LOG") {
        if !path.is_empty() {
            cfg.answer_log = Some(path.into());
        }
    }

    validate(&cfg)?;
    Ok(cfg)
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    static_dir: Option<PathBuf>,
    #[serde(default)]
    questions: Option<PathBuf>,
    #[serde(default)]
    answer_log: Option<PathBuf>,
}

fn apply_file(cfg: &mut Config, f: FileConfig) {
    if let Some(v) = f.host {
        cfg.host = v;
    }
    if let Some(v) = f.port {
        cfg.port = v;
    }
    if let Some(v) = f.static_dir {
        cfg.static_dir = v;
    }
    if let Some(v) = f.questions {
        cfg.questions = Some(v);
    }
    if let Some(v) = f.answer_log {
        cfg.answer_log = Some(v);
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.host.is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: host must not be empty".into(),
        ));
    }
    Ok(())
}
