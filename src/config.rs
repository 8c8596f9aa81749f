//! Client configuration parsed from environment variables.
//!
//! Every knob has a default so a bare `chessmate` invocation talks to a local
//! server. Only the base URL is validated; numeric values that fail to parse
//! fall back to their defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_PREFS_PATH: &str = ".chessmate-prefs.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_COMPUTER_MOVE_DELAY_MS: u64 = 500;
pub const DEFAULT_TOAST_VISIBLE_MS: u64 = 3500;
pub const DEFAULT_TOAST_FADE_MS: u64 = 400;
pub const DEFAULT_OVERLAY_VISIBLE_MS: u64 = 4000;
pub const DEFAULT_OVERLAY_FADE_MS: u64 = 800;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL '{0}' (expected http:// or https://)")]
    InvalidBaseUrl(String),
}

/// Fixed delays used by the view's scheduled side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Delay between a "computer's turn" reconciliation and the computer-move request.
    pub computer_move_delay: Duration,
    /// How long a toast stays fully visible.
    pub toast_visible: Duration,
    /// Fade-out duration before a toast is removed.
    pub toast_fade: Duration,
    /// How long an overlay alert stays before fading.
    pub overlay_visible: Duration,
    /// Fade-out duration before an overlay alert is removed.
    pub overlay_fade: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            computer_move_delay: Duration::from_millis(DEFAULT_COMPUTER_MOVE_DELAY_MS),
            toast_visible: Duration::from_millis(DEFAULT_TOAST_VISIBLE_MS),
            toast_fade: Duration::from_millis(DEFAULT_TOAST_FADE_MS),
            overlay_visible: Duration::from_millis(DEFAULT_OVERLAY_VISIBLE_MS),
            overlay_fade: Duration::from_millis(DEFAULT_OVERLAY_FADE_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub login_path: String,
    pub prefs_path: PathBuf,
    pub timeouts: HttpTimeouts,
    pub timings: Timings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            prefs_path: PathBuf::from(DEFAULT_PREFS_PATH),
            timeouts: HttpTimeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
            timings: Timings::default(),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `CHESSMATE_BASE_URL`: default `http://127.0.0.1:8080`
    /// - `CHESSMATE_LOGIN_PATH`: default `/login`
    /// - `CHESSMATE_PREFS_PATH`: default `.chessmate-prefs.json`
    /// - `CHESSMATE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `CHESSMATE_CONNECT_TIMEOUT_SECS`: default 10
    /// - `CHESSMATE_COMPUTER_MOVE_DELAY_MS`: default 500
    /// - `CHESSMATE_TOAST_VISIBLE_MS`: default 3500
    /// - `CHESSMATE_TOAST_FADE_MS`: default 400
    /// - `CHESSMATE_OVERLAY_VISIBLE_MS`: default 4000
    /// - `CHESSMATE_OVERLAY_FADE_MS`: default 800
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the base URL is not http(s).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the base URL is not http(s).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(
            &lookup("CHESSMATE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        )?;
        let login_path = lookup("CHESSMATE_LOGIN_PATH").unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_owned());
        let prefs_path = lookup("CHESSMATE_PREFS_PATH").map_or_else(|| PathBuf::from(DEFAULT_PREFS_PATH), PathBuf::from);

        let parse = |key: &str, default: u64| parse_u64(lookup(key).as_deref(), default);
        let timeouts = HttpTimeouts {
            request_secs: parse("CHESSMATE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse("CHESSMATE_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let timings = Timings {
            computer_move_delay: Duration::from_millis(parse(
                "CHESSMATE_COMPUTER_MOVE_DELAY_MS",
                DEFAULT_COMPUTER_MOVE_DELAY_MS,
            )),
            toast_visible: Duration::from_millis(parse("CHESSMATE_TOAST_VISIBLE_MS", DEFAULT_TOAST_VISIBLE_MS)),
            toast_fade: Duration::from_millis(parse("CHESSMATE_TOAST_FADE_MS", DEFAULT_TOAST_FADE_MS)),
            overlay_visible: Duration::from_millis(parse("CHESSMATE_OVERLAY_VISIBLE_MS", DEFAULT_OVERLAY_VISIBLE_MS)),
            overlay_fade: Duration::from_millis(parse("CHESSMATE_OVERLAY_FADE_MS", DEFAULT_OVERLAY_FADE_MS)),
        };

        Ok(Self { base_url, login_path, prefs_path, timeouts, timings })
    }

    /// Replace the base URL, applying the same validation as the env path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the URL is not http(s).
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(raw)?;
        Ok(self)
    }
}

fn parse_u64(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default)
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_owned())
    } else {
        Err(ConfigError::InvalidBaseUrl(raw.to_owned()))
    }
}
