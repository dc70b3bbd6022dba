//! Layered run configuration.
//!
//! Sources, highest priority first:
//! 1. CLI flags
//! 2. Environment variables (`CMSPROBE_*` prefix)
//! 3. Built-in defaults (local dev server, seeded admin account)

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_email() -> String {
    "admin@example.com".to_string()
}

fn default_password() -> String {
    "Admin@123".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// Base address of the server under test.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Admin login email.
    #[serde(default = "default_email")]
    pub email: String,

    /// Admin login password.
    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            email: default_email(),
            password: default_password(),
        }
    }
}

impl ProbeConfig {
    /// Load configuration from defaults and environment variables.
    ///
    /// # Errors
    ///
    /// Returns a figment error when an environment value cannot be
    /// deserialized into the config shape.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    /// Load configuration with `.env` file support.
    ///
    /// Missing `.env` files are fine; existing ones feed the environment
    /// before the figment is built.
    ///
    /// # Errors
    ///
    /// See [`ProbeConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, figment::Error> {
        dotenvy::dotenv().ok();
        Self::load()
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed("CMSPROBE_"))
    }

    /// Apply CLI flag overrides on top of the loaded configuration.
    #[must_use]
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(base_url) = &cli.base_url {
            self.base_url.clone_from(base_url);
        }
        if let Some(email) = &cli.email {
            self.email.clone_from(email);
        }
        if let Some(password) = &cli.password {
            self.password.clone_from(password);
        }
        self
    }
}
