use crate::core::gemini::DEFAULT_API_ENDPOINT;
use crate::core::ConfigProvider;
use crate::domain::model::{OutputFormat, RetryPolicy};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::time::Duration;

#[derive(Clone, Parser)]
#[command(name = "lead-outreach")]
#[command(about = "Draft personalized WhatsApp and email outreach for a CSV lead list")]
pub struct CliConfig {
    /// CSV lead list with Name, E-mail and PhoneNumber columns
    #[arg(long, default_value = "./input/leadlist.csv")]
    pub input_path: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// File stem for the generated outputs
    #[arg(long, default_value = "leadlist_updated")]
    pub output_name: String,

    #[arg(long, value_enum, value_delimiter = ',', default_value = "csv")]
    pub output_formats: Vec<OutputFormat>,

    /// Also bundle every output file into <output-name>.zip
    #[arg(long)]
    pub zip: bool,

    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "3")]
    pub retry_attempts: u32,

    /// Linear backoff step: attempt k waits k * this many seconds
    #[arg(long, default_value = "2")]
    pub retry_backoff_seconds: u64,

    /// Pause between leads
    #[arg(long, default_value = "1")]
    pub throttle_seconds: u64,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("input_path", &self.input_path)
            .field("output_path", &self.output_path)
            .field("output_name", &self.output_name)
            .field("output_formats", &self.output_formats)
            .field("zip", &self.zip)
            .field("api_endpoint", &self.api_endpoint)
            .field("api_key", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_backoff_seconds", &self.retry_backoff_seconds)
            .field("throttle_seconds", &self.throttle_seconds)
            .finish()
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_attempts,
            Duration::from_secs(self.retry_backoff_seconds),
        )
    }

    fn throttle_delay(&self) -> Duration {
        Duration::from_secs(self.throttle_seconds)
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_name(&self) -> &str {
        &self.output_name
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.output_formats
    }

    fn compress_output(&self) -> bool {
        self.zip
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input_path", &self.input_path)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_file_stem("output_name", &self.output_name)?;
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_secret("api_key", &self.api_key)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;
        validation::validate_positive_number("retry_attempts", self.retry_attempts as usize, 1)?;
        validation::validate_positive_number("output_formats", self.output_formats.len(), 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["lead-outreach", "--api-key", "k"]);

        assert_eq!(config.input_path, "./input/leadlist.csv");
        assert_eq!(config.output_formats, vec![OutputFormat::Csv]);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert_eq!(config.throttle_delay(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_multiple_output_formats() {
        let config = CliConfig::parse_from([
            "lead-outreach",
            "--api-key",
            "k",
            "--output-formats",
            "csv,tsv,json",
            "--zip",
        ]);

        assert_eq!(
            config.output_formats(),
            &[OutputFormat::Csv, OutputFormat::Tsv, OutputFormat::Json]
        );
        assert!(config.compress_output());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = CliConfig::parse_from(["lead-outreach", "--api-key", "k"]);
        config.retry_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = CliConfig::parse_from(["lead-outreach", "--api-key", "k"]);
        config.api_endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = CliConfig::parse_from(["lead-outreach", "--api-key", "super-secret"]);
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
