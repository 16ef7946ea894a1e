//! Node connection configuration.

use std::env;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::warn;

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:18443/wallet/Miner";
pub const DEFAULT_RPC_USER: &str = "alice";
pub const DEFAULT_RPC_PASSWORD: &str = "password";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const RPC_URL_ENV: &str = "TXCHECK_RPC_URL";
pub const RPC_USER_ENV: &str = "TXCHECK_RPC_USER";
pub const RPC_PASSWORD_ENV: &str = "TXCHECK_RPC_PASSWORD";
pub const RPC_TIMEOUT_ENV: &str = "TXCHECK_RPC_TIMEOUT";

#[derive(Clone)]
pub struct RpcConfig {
    url: String,
    user: String,
    password: String,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for RpcConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RPC_URL, DEFAULT_RPC_USER, DEFAULT_RPC_PASSWORD)
    }
}

impl RpcConfig {
    pub fn new(url: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user: user.into(),
            password: password.into(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            env_or(RPC_URL_ENV, DEFAULT_RPC_URL),
            env_or(RPC_USER_ENV, DEFAULT_RPC_USER),
            env_or(RPC_PASSWORD_ENV, DEFAULT_RPC_PASSWORD),
        )
        .with_timeout_secs(parse_env_u64(RPC_TIMEOUT_ENV, DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// `0` waits for the node indefinitely.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Value of the `Authorization` header.
    pub fn basic_auth_header(&self) -> String {
        let credentials = format!("{}:{}", self.user, self.password);
        format!("Basic {}", STANDARD.encode(credentials))
    }
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

fn parse_env_u64(key: &str, default: u64) -> u64 {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return default,
    };
    if value.trim().is_empty() {
        return default;
    }
    match value.trim().parse::<u64>() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(value = %value, key, "Invalid numeric config; using default");
            default
        }
    }
}
