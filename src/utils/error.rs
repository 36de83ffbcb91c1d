use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutreachError {
    #[error("Input file not found: {path}")]
    FileNotFound { path: String },

    #[error("Input is missing required column '{column}'")]
    MissingColumnError { column: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP client error: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Network,
    Output,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl OutreachError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OutreachError::FileNotFound { .. }
            | OutreachError::MissingColumnError { .. }
            | OutreachError::CsvError(_) => ErrorCategory::Input,
            OutreachError::ConfigError { .. }
            | OutreachError::MissingConfigError { .. }
            | OutreachError::InvalidConfigValueError { .. }
            | OutreachError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            OutreachError::ApiError(_) => ErrorCategory::Network,
            OutreachError::ZipError(_)
            | OutreachError::IoError(_)
            | OutreachError::SerializationError(_) => ErrorCategory::Output,
            OutreachError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration | ErrorCategory::Processing => {
                ErrorSeverity::High
            }
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            OutreachError::FileNotFound { .. } => {
                "Place the lead list at the configured input path (default ./input/leadlist.csv)"
            }
            OutreachError::MissingColumnError { .. } => {
                "The input needs the columns Name, E-mail and PhoneNumber in its header row"
            }
            OutreachError::CsvError(_) => {
                "Check that every row has the same number of fields and the file is UTF-8"
            }
            OutreachError::MissingConfigError { field } if field == "api_key" => {
                "Pass --api-key or set the GEMINI_API_KEY environment variable"
            }
            OutreachError::ConfigError { .. }
            | OutreachError::MissingConfigError { .. }
            | OutreachError::InvalidConfigValueError { .. }
            | OutreachError::ConfigValidationError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
            OutreachError::ApiError(_) => "Check network connectivity and TLS configuration",
            OutreachError::ZipError(_)
            | OutreachError::IoError(_)
            | OutreachError::SerializationError(_) => {
                "Make sure the output directory exists and is writable"
            }
            OutreachError::ProcessingError { .. } => "Re-run with --verbose for details",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Could not read the lead list: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Network => format!("Could not set up the API client: {}", self),
            ErrorCategory::Output => format!("Could not save the results: {}", self),
            ErrorCategory::Processing => format!("Processing failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, OutreachError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_is_fatal_input_error() {
        let err = OutreachError::FileNotFound {
            path: "input/leadlist.csv".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("input/leadlist.csv"));
    }

    #[test]
    fn test_write_failure_is_critical() {
        let err = OutreachError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only file system",
        ));
        assert_eq!(err.category(), ErrorCategory::Output);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_missing_api_key_suggestion() {
        let err = OutreachError::MissingConfigError {
            field: "api_key".to_string(),
        };
        assert!(err.recovery_suggestion().contains("GEMINI_API_KEY"));
    }
}
