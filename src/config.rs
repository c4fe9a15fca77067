use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/";
pub const DEFAULT_POLL: &str = "videos";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const TOKEN_ENV_VAR: &str = "UIDNAV_API_TOKEN";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub poll: String,
    pub timeout: Duration,
    pub token: Option<String>,
}

impl Config {
    pub fn new(api_url: &str, poll: &str, timeout_secs: u64, token: Option<String>) -> Result<Self> {
        let api_url =
            Url::parse(api_url).map_err(|e| anyhow!("Invalid API URL '{}': {}", api_url, e))?;

        let config = Self {
            api_url,
            poll: poll.trim().to_string(),
            timeout: Duration::from_secs(timeout_secs),
            token: token.filter(|t| !t.trim().is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !matches!(self.api_url.scheme(), "http" | "https") {
            return Err(anyhow!(
                "Invalid API URL '{}': scheme must be http or https",
                self.api_url
            ));
        }
        if self.poll.is_empty() {
            return Err(anyhow!("Poll name must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(anyhow!("Request timeout must be > 0"));
        }
        Ok(())
    }
}

/// Read the API token from the environment, if set.
pub fn token_from_env() -> Option<String> {
    env::var(TOKEN_ENV_VAR).ok()
}
