//! Client configuration.
//!
//! Holds the API token, version and an optional base URL override. Built
//! once, validated when the client is constructed, and read-only afterwards.

use std::fmt;

use figment::providers::Env;
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Root used when no base URL override is configured.
pub const DEFAULT_HOST: &str = "https://api.pipedrive.com";

/// Default API version.
pub const DEFAULT_API_VERSION: u32 = 1;

/// Prefix for environment variables read by [`ClientConfig::from_env`].
pub const ENV_PREFIX: &str = "PIPEDRIVE_";

/// Printed in place of secrets by `Debug` impls.
pub(crate) const REDACTED: &str = "[REDACTED]";

/// Client configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Replaces the versioned default root when set.
    pub base_url: Option<String>,

    /// Version segment of the default root. Values below 1 mean 1.
    pub api_version: u32,

    /// Sent as the `api_token` query parameter on every request.
    pub api_token: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("api_token", &REDACTED)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_version: DEFAULT_API_VERSION,
            api_token: String::new(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: u32) -> Self {
        self.api_version = api_version;
        self
    }

    /// Load `PIPEDRIVE_API_TOKEN`, `PIPEDRIVE_BASE_URL` and
    /// `PIPEDRIVE_API_VERSION` from the environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::extract(Figment::new().merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Extract and validate a configuration from any figment.
    pub fn extract(figment: Figment) -> Result<Self, Error> {
        let config: ClientConfig = figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The root every resource path is appended to.
    pub fn base_path(&self) -> String {
        match self.base_url.as_deref() {
            Some(base) if !base.is_empty() => base.to_string(),
            _ => format!("{DEFAULT_HOST}/v{}", self.api_version.max(1)),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.api_token.trim().is_empty() {
            return Err(Error::InvalidConfig("api_token cannot be empty".to_string()));
        }

        if let Some(base) = self.base_url.as_deref().filter(|b| !b.is_empty()) {
            if !base.starts_with("http://") && !base.starts_with("https://") {
                return Err(Error::InvalidConfig(
                    "base_url must start with http:// or https://".to_string(),
                ));
            }
        }

        Ok(())
    }
}
