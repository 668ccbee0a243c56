pub mod engine;
pub mod extract;
pub mod registry;
pub mod search;
pub mod site;

pub use crate::domain::model::{CompanyQuery, EnrichedProfile, FieldMap, SourceKind, SourceResult};
pub use crate::domain::ports::{RegistrySource, SearchSource, SiteSource};
pub use crate::utils::error::Result;

use crate::config::toml_config::{HttpConfig, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};
use std::time::Duration;

/// 各來源共用的 HTTP 設定
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientSettings {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&HttpConfig> for ClientSettings {
    fn from(config: &HttpConfig) -> Self {
        Self {
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}
