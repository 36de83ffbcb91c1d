use crate::core::gemini::DEFAULT_API_ENDPOINT;
use crate::core::ConfigProvider;
use crate::domain::model::{OutputFormat, RetryPolicy};
use crate::utils::error::{OutreachError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_backoff_seconds: Option<u64>,
    pub throttle_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_output_name")]
    pub output_name: String,
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<OutputFormat>,
    #[serde(default)]
    pub compress: bool,
}

fn default_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_output_path() -> String {
    "./output".to_string()
}

fn default_output_name() -> String {
    "leadlist_updated".to_string()
}

fn default_output_formats() -> Vec<OutputFormat> {
    vec![OutputFormat::Csv]
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            timeout_seconds: None,
            retry_attempts: None,
            retry_backoff_seconds: None,
            throttle_seconds: None,
        }
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            output_name: default_output_name(),
            output_formats: default_output_formats(),
            compress: false,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OutreachError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OutreachError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OutreachError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("source.input_path", &self.source.input_path)?;
        validation::validate_url("api.endpoint", &self.api.endpoint)?;

        // 未替換的 ${VAR} 代表環境變數缺失
        if self.api.api_key.starts_with("${") {
            return Err(OutreachError::MissingConfigError {
                field: "api_key".to_string(),
            });
        }
        validation::validate_secret("api_key", &self.api.api_key)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_range("api.timeout_seconds", timeout, 1, 600)?;
        }
        if let Some(attempts) = self.api.retry_attempts {
            validation::validate_positive_number("api.retry_attempts", attempts as usize, 1)?;
        }

        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_file_stem("load.output_name", &self.load.output_name)?;
        validation::validate_positive_number(
            "load.output_formats",
            self.load.output_formats.len(),
            1,
        )?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.input_path
    }

    fn api_endpoint(&self) -> &str {
        &self.api.endpoint
    }

    fn api_key(&self) -> &str {
        &self.api.api_key
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds.unwrap_or(30))
    }

    fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        RetryPolicy::new(
            self.api.retry_attempts.unwrap_or(defaults.max_attempts),
            self.api
                .retry_backoff_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.backoff_step),
        )
    }

    fn throttle_delay(&self) -> Duration {
        Duration::from_secs(self.api.throttle_seconds.unwrap_or(1))
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_name(&self) -> &str {
        &self.load.output_name
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.load.output_formats
    }

    fn compress_output(&self) -> bool {
        self.load.compress
    }
}

impl Validate for TomlConfig {
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
    fn test_parse_minimal_config_uses_defaults() {
        let toml_content = r#"
[source]
input_path = "./input/leadlist.csv"

[api]
api_key = "abc"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_endpoint(), DEFAULT_API_ENDPOINT);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert_eq!(config.throttle_delay(), Duration::from_secs(1));
        assert_eq!(config.output_path(), "./output");
        assert_eq!(config.output_formats(), &[OutputFormat::Csv]);
        assert!(!config.compress_output());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
input_path = "leads.csv"

[api]
endpoint = "http://localhost:9000/generate"
api_key = "abc"
timeout_seconds = 10
retry_attempts = 5
retry_backoff_seconds = 3
throttle_seconds = 0

[load]
output_path = "./out"
output_name = "drafts"
output_formats = ["csv", "tsv", "json"]
compress = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.retry_policy().max_attempts, 5);
        assert_eq!(config.retry_policy().delay_after(2), Duration::from_secs(6));
        assert_eq!(config.throttle_delay(), Duration::ZERO);
        assert_eq!(config.output_name(), "drafts");
        assert_eq!(config.output_formats().len(), 3);
        assert!(config.compress_output());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LEAD_OUTREACH_TEST_KEY", "from-env");

        let toml_content = r#"
[source]
input_path = "leads.csv"

[api]
api_key = "${LEAD_OUTREACH_TEST_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), "from-env");

        std::env::remove_var("LEAD_OUTREACH_TEST_KEY");
    }

    #[test]
    fn test_unresolved_api_key_fails_validation() {
        let toml_content = r#"
[source]
input_path = "leads.csv"

[api]
api_key = "${LEAD_OUTREACH_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(OutreachError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[source]
input_path = "leads.csv"

[api]
endpoint = "invalid-url"
api_key = "abc"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_output_format_is_rejected() {
        let toml_content = r#"
[source]
input_path = "leads.csv"

[load]
output_formats = ["xlsx"]
"#;

        assert!(TomlConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[source]
input_path = "./input/leadlist.csv"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.input_path(), "./input/leadlist.csv");
    }
}
