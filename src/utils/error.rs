use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Network request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Store responded with status {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Store rejected the developer: {message}")]
    Rejected { message: String },

    #[error("Malformed store response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    Validation,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DirectoryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DirectoryError::Transport(_) => ErrorCategory::Network,
            DirectoryError::Server { .. } | DirectoryError::Decode(_) => ErrorCategory::Server,
            DirectoryError::Rejected { .. } => ErrorCategory::Validation,
            DirectoryError::ConfigError { .. }
            | DirectoryError::InvalidConfigValueError { .. }
            | DirectoryError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            DirectoryError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 使用者修正表單後可重新送出
            ErrorCategory::Validation => ErrorSeverity::High,
            ErrorCategory::Network | ErrorCategory::Server => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 可直接顯示給使用者的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            DirectoryError::Transport(e) if e.is_timeout() => {
                "The directory service did not answer in time".to_string()
            }
            DirectoryError::Transport(_) => "Could not reach the directory service".to_string(),
            DirectoryError::Server { status, .. } => {
                format!("The directory service failed (HTTP {})", status)
            }
            DirectoryError::Decode(_) => {
                "The directory service returned an unreadable response".to_string()
            }
            DirectoryError::Rejected { message } => message.clone(),
            DirectoryError::Io(e) => format!("File access failed: {}", e),
            DirectoryError::ConfigError { .. }
            | DirectoryError::InvalidConfigValueError { .. }
            | DirectoryError::ConfigValidationError { .. } => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your connection and the --api-url setting, then retry",
            ErrorCategory::Server => "Refresh later; the service may be restarting",
            ErrorCategory::Validation => "Correct the highlighted values and submit again",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::System => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
