use crate::utils::error::{EnrichError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

pub const DEFAULT_REGISTRY_ENDPOINT: &str = "https://api.sam.gov/entity-information/v3/entities";
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.google.com/search";
pub const DEFAULT_ENGINE_DOMAIN: &str = "google.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_OUTPUT_PATH: &str = "./profiles";

pub const API_KEY_ENV: &str = "SAM_GOV_API_KEY";

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    pub registry: RegistryConfig,
    pub search: SearchConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: String,
    /// 搜尋引擎自己的網域，擷取網站時排除
    pub engine_domain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_REGISTRY_ENDPOINT.to_string(),
            api_key: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            engine_domain: DEFAULT_ENGINE_DOMAIN.to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

impl RegistryConfig {
    /// 有效的 API key；空白或未替換的 `${VAR}` 視為沒有設定
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !ENV_PLACEHOLDER.is_match(key))
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl EnrichConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EnrichError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EnrichError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 只用環境變數建立配置（API key 在這裡讀一次）
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.registry.api_key = std::env::var(API_KEY_ENV).ok();
        if let Ok(endpoint) = std::env::var("SAM_GOV_ENDPOINT") {
            config.registry.endpoint = endpoint;
        }
        if let Ok(endpoint) = std::env::var("SEARCH_ENDPOINT") {
            config.search.endpoint = endpoint;
        }
        config
    }

    /// 替換環境變數 (例如 ${SAM_GOV_API_KEY})，找不到的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_url("registry.endpoint", &self.registry.endpoint)?;
        validate_url("search.endpoint", &self.search.endpoint)?;
        validate_non_empty_string("search.engine_domain", &self.search.engine_domain)?;
        validate_range("http.timeout_seconds", self.http.timeout_seconds, 1, 120)?;
        validate_non_empty_string("http.user_agent", &self.http.user_agent)?;
        validate_path("output.path", &self.output.path)?;

        if self.registry.api_key().is_none() {
            tracing::info!("ℹ️ No {} configured, registry lookups are disabled", API_KEY_ENV);
        }

        Ok(())
    }
}

impl Validate for EnrichConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[registry]
endpoint = "https://api.sam.gov/entity-information/v3/entities"
api_key = "abc123"

[search]
endpoint = "https://search.example.com/search"
engine_domain = "example.com"

[http]
timeout_seconds = 5
user_agent = "TestAgent/1.0"

[output]
path = "./test-profiles"
"#;

        let config = EnrichConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.registry.api_key(), Some("abc123"));
        assert_eq!(config.search.endpoint, "https://search.example.com/search");
        assert_eq!(config.search.engine_domain, "example.com");
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
        assert_eq!(config.output.path, "./test-profiles");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = EnrichConfig::from_toml_str("").unwrap();

        assert_eq!(config.registry.endpoint, DEFAULT_REGISTRY_ENDPOINT);
        assert_eq!(config.registry.api_key(), None);
        assert_eq!(config.search.endpoint, DEFAULT_SEARCH_ENDPOINT);
        assert_eq!(config.http.timeout_seconds, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_ENRICH_SAM_KEY", "from-env");

        let config = EnrichConfig::from_toml_str(
            r#"
[registry]
api_key = "${TEST_ENRICH_SAM_KEY}"
"#,
        )
        .unwrap();
        assert_eq!(config.registry.api_key(), Some("from-env"));

        std::env::remove_var("TEST_ENRICH_SAM_KEY");
    }

    #[test]
    fn test_unresolved_placeholder_disables_registry() {
        let config = EnrichConfig::from_toml_str(
            r#"
[registry]
api_key = "${TEST_ENRICH_DEFINITELY_UNSET_KEY}"
"#,
        )
        .unwrap();
        assert_eq!(config.registry.api_key(), None);

        let config = EnrichConfig::from_toml_str("[registry]\napi_key = \"   \"\n").unwrap();
        assert_eq!(config.registry.api_key(), None);
    }

    #[test]
    fn test_config_validation() {
        let config = EnrichConfig::from_toml_str(
            r#"
[search]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = EnrichConfig::from_toml_str("[http]\ntimeout_seconds = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = EnrichConfig::from_toml_str("[http]\ntimeout_seconds = \"ten\"\n").unwrap_err();
        assert!(matches!(err, EnrichError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\npath = \"./from-file\"\n")
            .unwrap();

        let config = EnrichConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output.path, "./from-file");
    }
}
