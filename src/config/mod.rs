#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ApiSettings;
use crate::utils::error::{Result, ZuoraError};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://apisandbox.zuora.com/apps/services/a/38.0";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Where and as whom to talk to the SOAP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub session_id: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            session_id: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ApiConfig {
    /// Overrides fields from `ZUORA_ENDPOINT`, `ZUORA_SESSION_ID` and
    /// `ZUORA_TIMEOUT_SECONDS` when they are set.
    pub fn with_env(mut self) -> Result<Self> {
        if let Ok(endpoint) = std::env::var("ZUORA_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Ok(session_id) = std::env::var("ZUORA_SESSION_ID") {
            self.session_id = Some(session_id);
        }
        if let Ok(timeout) = std::env::var("ZUORA_TIMEOUT_SECONDS") {
            self.timeout_seconds =
                timeout
                    .parse()
                    .map_err(|_| ZuoraError::InvalidConfigValueError {
                        field: "ZUORA_TIMEOUT_SECONDS".to_string(),
                        value: timeout.clone(),
                        reason: "must be a whole number of seconds".to_string(),
                    })?;
        }
        Ok(self)
    }

    pub fn from_env() -> Result<Self> {
        Self::default().with_env()
    }
}

impl ApiSettings for ApiConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.endpoint", &self.endpoint)?;
        validate_range("api.timeout_seconds", self.timeout_seconds, 1, 300)?;
        if let Some(session_id) = &self.session_id {
            validate_non_empty_string("api.session_id", session_id)?;
        }
        Ok(())
    }
}
