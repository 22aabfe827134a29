use std::{env, time::Duration};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Enables destructive endpoints such as clearing the whole catalogue.
    pub testing: bool,
    pub retry: RetryPolicy,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let testing = env::var("APP_TESTING")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Ok(Self {
            port,
            database_url,
            host,
            testing,
            retry: RetryPolicy::from_env(),
        })
    }
}

/// Connection retry schedule used while the database is still coming up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
    pub backoff: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_secs(1),
            backoff: 2,
        }
    }
}

impl RetryPolicy {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let attempts = env_u32("RETRY_COUNT").unwrap_or(defaults.attempts).max(1);
        let delay = env_u32("RETRY_DELAY")
            .map(|s| Duration::from_secs(u64::from(s)))
            .unwrap_or(defaults.delay);
        let backoff = env_u32("RETRY_BACKOFF").unwrap_or(defaults.backoff).max(1);
        Self {
            attempts,
            delay,
            backoff,
        }
    }

    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = self.backoff.saturating_pow(attempt.saturating_sub(1));
        self.delay.saturating_mul(factor)
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("PRODUCT_SERVICE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
        Self { base_url }
    }
}

fn env_u32(key: &str) -> Option<u32> {
    env::var(key).ok().and_then(|v| v.trim().parse::<u32>().ok())
}
