use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_OUTPUT: &str = "interaction_data.json";

/// Tunables shared by every invocation. Environment variables prefixed
/// `DDI_` override the defaults (`DDI_TIMEOUT_SECS=5`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub workers: usize,
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            workers: DEFAULT_WORKERS,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Settings {
    /// Defaults overlaid with `DDI_*` environment variables. A bad value is
    /// logged and the defaults are used.
    pub fn from_env() -> Self {
        Self::from_source(config::Environment::with_prefix("DDI"))
    }

    fn from_source(source: config::Environment) -> Self {
        let built = config::Config::builder()
            .add_source(source.try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize::<Settings>());
        match built {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring invalid DDI_* settings: {}", e);
                Settings::default()
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// One lookup: where the catalog lives and which two drugs to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub catalog_path: PathBuf,
    pub drug1: String,
    pub drug2: String,
}
