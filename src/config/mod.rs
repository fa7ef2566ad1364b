use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Password used when nothing else is configured in development.
const DEV_CLASS_PASSWORD: &str = "mathrocks";
const DEV_SESSION_SECRET: &str = "development-only-session-secret";
const MIN_SECRET_LEN: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    pub environment: Environment,
    pub class_password: String,
    pub session_secret: String,
    pub bind_host: String,
    pub bind_port: u16,
    pub static_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub session_ttl_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("class password is not configured (set PORTAL_CLASS_PASSWORD)")]
    MissingPassword,
    #[error("session secret is not configured (set PORTAL_SESSION_SECRET)")]
    MissingSecret,
    #[error("session secret must be at least {} bytes", MIN_SECRET_LEN)]
    WeakSecret,
    #[error("session TTL must be greater than zero")]
    ZeroSessionTtl,
}

impl PortalConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORTAL_CLASS_PASSWORD") {
            self.class_password = v;
        }
        if let Ok(v) = env::var("PORTAL_SESSION_SECRET") {
            self.session_secret = v;
        }
        if let Ok(v) = env::var("PORTAL_HOST") {
            self.bind_host = v;
        }
        if let Some(port) = env::var("PORTAL_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.bind_port = port;
        }
        if let Ok(v) = env::var("PORTAL_STATIC_DIR") {
            self.static_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("PORTAL_CATALOG") {
            self.catalog_path = Some(PathBuf::from(v));
        }
        if let Ok(v) = env::var("PORTAL_SESSION_TTL_SECS") {
            self.session_ttl_secs = v.parse().unwrap_or(self.session_ttl_secs);
        }

        self
    }

    /// Reject configurations that would leave the gate open or the cookies forgeable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.class_password.is_empty() {
            return Err(ConfigError::MissingPassword);
        }
        if self.session_secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if self.environment != Environment::Development
            && self.session_secret.len() < MIN_SECRET_LEN
        {
            return Err(ConfigError::WeakSecret);
        }
        if self.session_ttl_secs == 0 {
            return Err(ConfigError::ZeroSessionTtl);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.bind_port)
    }

    fn base(environment: Environment) -> Self {
        Self {
            environment,
            class_password: String::new(),
            session_secret: String::new(),
            bind_host: "0.0.0.0".to_string(),
            bind_port: 8000,
            static_dir: PathBuf::from("static"),
            catalog_path: None,
            session_ttl_secs: 8 * 60 * 60, // one school day
        }
    }

    pub fn development() -> Self {
        Self {
            class_password: DEV_CLASS_PASSWORD.to_string(),
            session_secret: DEV_SESSION_SECRET.to_string(),
            ..Self::base(Environment::Development)
        }
    }

    pub fn staging() -> Self {
        Self::base(Environment::Staging)
    }

    pub fn production() -> Self {
        Self::base(Environment::Production)
    }
}
