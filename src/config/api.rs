use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_PRODUCT_IMAGE_PREFIX: &str = "https://static.zara.net/photos/";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} is not a non-negative integer")]
    InvalidNumber { name: &'static str, value: String },
    #[error("Invalid value for {name}: must be greater than zero")]
    Zero { name: &'static str },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub session_check_timeout: Duration,
    pub tryon_timeout: Duration,
    pub token_check_interval: Duration,
    pub redirect_delay: Duration,
    pub product_image_prefix: String,
    pub session_file: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session_check_timeout: Duration::from_millis(5000),
            tryon_timeout: Duration::from_millis(60_000),
            token_check_interval: Duration::from_secs(5 * 60),
            redirect_delay: Duration::from_millis(3000),
            product_image_prefix: DEFAULT_PRODUCT_IMAGE_PREFIX.to_string(),
            session_file: default_session_file(),
        }
    }
}

impl ApiConfig {
    /// Reads the client configuration from the environment. Call
    /// `dotenvy::dotenv()` first to pick up a local `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let base_url = env::var("FASHION_API_BASE_URL").unwrap_or(defaults.base_url);
        let product_image_prefix =
            env::var("PRODUCT_IMAGE_PREFIX").unwrap_or(defaults.product_image_prefix);
        let session_file = env::var("FASHION_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_file);

        Ok(Self {
            base_url: normalize_base_url(&base_url),
            session_check_timeout: millis_var(
                "SESSION_CHECK_TIMEOUT_MS",
                defaults.session_check_timeout,
            )?,
            tryon_timeout: millis_var("TRYON_TIMEOUT_MS", defaults.tryon_timeout)?,
            token_check_interval: nonzero_secs_var(
                "TOKEN_CHECK_INTERVAL_SECS",
                defaults.token_check_interval,
            )?,
            redirect_delay: millis_var("SESSION_REDIRECT_DELAY_MS", defaults.redirect_delay)?,
            product_image_prefix,
            session_file,
        })
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            ..Self::default()
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn default_session_file() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("fashion-assistant").join("session.json"))
        .unwrap_or_else(|| PathBuf::from(".fashion-session.json"))
}

fn number_var(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        Err(_) => Ok(None),
    }
}

fn millis_var(name: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    Ok(number_var(name)?.map(Duration::from_millis).unwrap_or(default))
}

/// A zero interval would turn the liveness watcher into a busy loop.
fn nonzero_secs_var(name: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match number_var(name)? {
        Some(0) => Err(ConfigError::Zero { name }),
        Some(secs) => Ok(Duration::from_secs(secs)),
        None => Ok(default),
    }
}
