/*
 * Responsibility
 * - 環境変数や設定の読み込み (OBP 接続先、タイムアウト、アプリ資格情報など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use std::{env, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Fixed application-level DirectLogin credentials.
#[derive(Clone)]
pub struct ObpAuthConfig {
    pub username: String,
    pub password: String,
    pub consumer_key: String,
}

impl fmt::Debug for ObpAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never expose password/consumer key through Debug output.
        f.debug_struct("ObpAuthConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("consumer_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct ObpConfig {
    pub base_url: String,
    pub api_version: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub auth: ObpAuthConfig,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub obp: ObpConfig,
    // Verify upstream connectivity at boot (service credential + users/current).
    pub startup_probe: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let base_url = env::var("OBP_BASE_URL")
            .map_err(|_| ConfigError::Missing("OBP_BASE_URL"))?
            .trim_end_matches('/')
            .to_string();
        if base_url.is_empty() {
            return Err(ConfigError::Invalid("OBP_BASE_URL"));
        }

        let api_version =
            env::var("OBP_API_VERSION").unwrap_or_else(|_| "v5.1.0".to_string());

        let connect_timeout = env::var("OBP_CONNECT_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(5_000));
        let read_timeout = env::var("OBP_READ_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(10_000));

        let username =
            env::var("OBP_USERNAME").map_err(|_| ConfigError::Missing("OBP_USERNAME"))?;
        let password =
            env::var("OBP_PASSWORD").map_err(|_| ConfigError::Missing("OBP_PASSWORD"))?;
        let consumer_key =
            env::var("OBP_CONSUMER_KEY").map_err(|_| ConfigError::Missing("OBP_CONSUMER_KEY"))?;

        let startup_probe = env::var("OBP_STARTUP_PROBE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(false);

        Ok(Config {
            addr,
            app_env,
            obp: ObpConfig {
                base_url,
                api_version,
                connect_timeout,
                read_timeout,
                auth: ObpAuthConfig {
                    username,
                    password,
                    consumer_key,
                },
            },
            startup_probe,
        })
    }
}
