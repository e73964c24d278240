use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::dispatcher::DEFAULT_MAX_IN_FLIGHT;
use crate::core::overlap::DEFAULT_RELEVANCE_THRESHOLD;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    #[serde(default)]
    pub collection: CollectionSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub dispatch: DispatchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    #[serde(default = "default_alumni_profiles")]
    pub alumni_profiles: String,
    #[serde(default = "default_jobs")]
    pub jobs: String,
    #[serde(default = "default_notifications")]
    pub notifications: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            alumni_profiles: default_alumni_profiles(),
            jobs: default_jobs(),
            notifications: default_notifications(),
        }
    }
}

fn default_alumni_profiles() -> String { "alumniProfiles".to_string() }
fn default_jobs() -> String { "jobs".to_string() }
fn default_notifications() -> String { "notifications".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Minimum number of shared skills for a job/alumnus pair to match
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            relevance_threshold: default_relevance_threshold(),
        }
    }
}

fn default_relevance_threshold() -> usize { DEFAULT_RELEVANCE_THRESHOLD }

#[derive(Debug, Clone, Deserialize)]
pub struct DispatchSettings {
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
    #[serde(default = "default_push_enabled")]
    pub push_enabled: bool,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            max_in_flight: default_max_in_flight(),
            push_enabled: default_push_enabled(),
        }
    }
}

fn default_max_in_flight() -> usize { DEFAULT_MAX_IN_FLIGHT }
fn default_push_enabled() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl LoggingSettings {
    /// Apply the `LOG_LEVEL` and `LOG_FORMAT` variables on top of the file values
    pub fn with_env_overrides(self) -> Self {
        self.overridden_by(std::env::var("LOG_LEVEL").ok(), std::env::var("LOG_FORMAT").ok())
    }

    fn overridden_by(self, level: Option<String>, format: Option<String>) -> Self {
        Self {
            level: level.filter(|l| !l.trim().is_empty()).unwrap_or(self.level),
            format: format.filter(|f| !f.trim().is_empty()).unwrap_or(self.format),
        }
    }

    pub fn is_pretty(&self) -> bool {
        self.format.eq_ignore_ascii_case("pretty")
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SKILLMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SKILLMATCH__MATCHING__RELEVANCE_THRESHOLD -> matching.relevance_threshold
            .add_source(env_source())
            .build()?;

        apply_appwrite_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("SKILLMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Honor the plain `APPWRITE_*` variables used by the Appwrite CLI and
/// deployment scripts
fn apply_appwrite_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let overrides = [
        ("APPWRITE_ENDPOINT", "appwrite.endpoint"),
        ("APPWRITE_API_KEY", "appwrite.api_key"),
        ("APPWRITE_PROJECT_ID", "appwrite.project_id"),
        ("APPWRITE_DATABASE_ID", "appwrite.database_id"),
    ];

    let mut builder = Config::builder().add_source(settings);
    for (var, key) in overrides {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
