//! User configuration for quizterm.
//!
//! Read from `$QUIZTERM_CONFIG` if set, else `$XDG_CONFIG_HOME/quizterm/config.toml`,
//! else `~/.config/quizterm/config.toml`. Every key is optional:
//!
//! ```toml
//! theme = "dark"
//! timer_secs = 30
//! question_count = 10
//! api_url = "https://opentdb.com/api.php"
//! data_dir = "/home/me/.local/share/quizterm"
//! ```

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Default trivia endpoint.
pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Resolved configuration. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    /// Seconds per question.
    pub timer_secs: u32,
    /// Questions per quiz.
    pub question_count: u32,
    pub api_url: String,
    /// Where the score database and log file live.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            timer_secs: quizterm_core::DEFAULT_TIMER_SECS,
            question_count: 10,
            api_url: DEFAULT_API_URL.to_owned(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Loads the config file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    /// Callers treat this as a soft failure and fall back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path();
        let raw = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        Self::parse(&raw).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Parses TOML text and clamps out-of-range values.
    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        let config: Self = toml::from_str(raw)?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        self.timer_secs = self.timer_secs.max(1);
        self.question_count = self.question_count.clamp(1, 50);
        if self.api_url.trim().is_empty() {
            self.api_url = DEFAULT_API_URL.to_owned();
        }
        self
    }

    /// Directory for `scores.db` and `quizterm.log`.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir().join("scores.db")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("quizterm.log")
    }
}

/// `$name` as a path, or `$HOME/<fallback>` when the variable is absent.
fn xdg_dir(name: &str, fallback: &str) -> PathBuf {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(fallback))
        })
        .unwrap_or_else(|| PathBuf::from(fallback))
}

/// Path of the config file, honouring `QUIZTERM_CONFIG`.
pub fn config_path() -> PathBuf {
    if let Some(p) = std::env::var_os("QUIZTERM_CONFIG") {
        return PathBuf::from(p);
    }
    xdg_dir("XDG_CONFIG_HOME", ".config")
        .join("quizterm")
        .join("config.toml")
}

fn default_data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share").join("quizterm")
}
