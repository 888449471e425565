//! Runtime configuration for a form session.
//!
//! Values are layered: serde defaults, then `.env`, then environment
//! variables with the `PROFILE_FORM__` prefix and `__` as the nesting
//! separator, e.g. `PROFILE_FORM__SEED__FIRST_NAME=Anna`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::SubmitClient;
use crate::error::FormError;
use crate::types::DraftSeed;

pub const ENV_PREFIX: &str = "PROFILE_FORM";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Acceptor URL that receives the JSON payload.
    pub endpoint: String,
    /// Operational address added to every payload as `email`.
    pub contact_email: String,
    pub timeout_secs: u64,
    /// Enforce required fields and the age range before transmitting.
    pub strict: bool,
    pub seed: DraftSeed,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:3000/profile".to_string(),
            contact_email: "profile-inbox@example.com".to_string(),
            timeout_secs: 10,
            strict: false,
            seed: DraftSeed::default(),
        }
    }
}

impl FormConfig {
    /// Load defaults overridden by `.env` and `PROFILE_FORM__*` variables.
    pub fn load() -> Result<Self, FormError> {
        dotenvy::dotenv().ok();
        Self::from_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
    }

    fn from_source<S>(source: S) -> Result<Self, FormError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(source)
            .build()?;
        let loaded: Self = config.try_deserialize()?;
        loaded.check()?;
        Ok(loaded)
    }

    fn check(&self) -> Result<(), FormError> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(FormError::Config(format!(
                "endpoint must be an http(s) URL, got {:?}",
                self.endpoint
            )));
        }
        if self.timeout_secs == 0 {
            return Err(FormError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn client(&self) -> SubmitClient {
        SubmitClient::new(&self.endpoint, &self.contact_email)
    }
}
