//! Application configuration.

use serde::{Deserialize, Serialize};

use namaskar_classifier::ClassifierConfig;
use namaskar_core::{Error, Result};
use namaskar_tracker::TrackerConfig;

/// Everything a session host needs, loadable from a file and the environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,

    pub tracker: TrackerConfig,

    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            tracker: TrackerConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Environment variable prefix, e.g. `NAMASKAR_TRACKER__CONFIRMATION_THRESHOLD=5`
    pub const ENV_PREFIX: &'static str = "NAMASKAR";

    /// Load configuration from file, with environment overrides
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(Self::environment())
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Self::finish(settings)
    }

    /// Load from environment variables only
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(Self::environment())
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Self::finish(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;
        self.tracker.validate()?;
        Ok(())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(Self::ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn finish(settings: config::Config) -> Result<Self> {
        let config: Self = settings
            .try_deserialize()
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
